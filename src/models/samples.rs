use super::{Property, PropertyType};

/// Listings seeded into an empty store on first start
pub fn default_listings() -> Vec<Property> {
    vec![
        Property {
            id: "1".to_string(),
            title: "דירת 5 חדרים יוקרתית בכרמי גת".to_string(),
            location: "קריית גת, כרמי גת".to_string(),
            price: 2_450_000,
            bedrooms: 5.0,
            bathrooms: 2.0,
            area: 125.0,
            property_type: PropertyType::Apartment,
            images: vec![
                "https://images.unsplash.com/photo-1522708323590-d24dbb6b0267?auto=format&fit=crop&w=800&q=80".to_string(),
            ],
            description: "דירה חדשה ומעוצבת בלב השכונה המבוקשת. נוף פתוח, מרפסת שמש גדולה ומטבח משודרג.".to_string(),
            video_url: None,
            featured: Some(true),
        },
        Property {
            id: "2".to_string(),
            title: "פנטהאוז מפואר עם מרפסת ענקית".to_string(),
            location: "קריית גת, כרמי גת".to_string(),
            price: 3_200_000,
            bedrooms: 6.0,
            bathrooms: 3.0,
            area: 180.0,
            property_type: PropertyType::Penthouse,
            images: vec![
                "https://images.unsplash.com/photo-1512917774080-9991f1c4c750?auto=format&fit=crop&w=800&q=80".to_string(),
            ],
            description: "פנטהאוז יחיד בקומה, מעוצב אדריכלית עם מפרט טכני עשיר ונוף פנורמי לכל האזור.".to_string(),
            video_url: None,
            featured: Some(true),
        },
        Property {
            id: "3".to_string(),
            title: "קוטג׳ פינתי בשכונה הוותיקה".to_string(),
            location: "קריית גת, רובע הפרחים".to_string(),
            price: 2_850_000,
            bedrooms: 5.0,
            bathrooms: 2.5,
            area: 160.0,
            property_type: PropertyType::House,
            images: vec![
                "https://images.unsplash.com/photo-1600585154340-be6161a56a0c?auto=format&fit=crop&w=800&q=80".to_string(),
            ],
            description: "בית פרטי שקט ומטופח עם גינה גדולה והרבה פוטנציאל. מיקום מצוין בקרבת מוסדות חינוך.".to_string(),
            video_url: None,
            featured: Some(false),
        },
        Property {
            id: "4".to_string(),
            title: "דירת 4 חדרים מושקעת למכירה".to_string(),
            location: "קריית גת, כרמי גת".to_string(),
            price: 2_150_000,
            bedrooms: 4.0,
            bathrooms: 2.0,
            area: 105.0,
            property_type: PropertyType::Apartment,
            images: vec![
                "https://images.unsplash.com/photo-1493809842364-78817add7ffb?auto=format&fit=crop&w=800&q=80".to_string(),
            ],
            description: "דירה מוארת ומרווחת, קרובה לפארק המרכזי. מושלמת למשפחות צעירות או להשקעה.".to_string(),
            video_url: None,
            featured: Some(false),
        },
    ]
}
