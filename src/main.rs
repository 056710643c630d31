mod admin;
mod advice;
mod catalog;
mod config;
mod contact;
mod models;
mod store;

use admin::AdminGate;
use advice::{AdviceDesk, GeminiAdvisor};
use anyhow::{Context, Result};
use catalog::{CatalogView, FilterCriteria, TypeFilter};
use clap::{Parser, Subcommand};
use config::AppConfig;
use contact::ContactLinks;
use models::{format_price, Property, PropertyDraft};
use std::path::{Path, PathBuf};
use store::{FileStorage, ListingStore};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "listing-desk")]
#[command(about = "Property catalog, buyer chat and listing admin for a real-estate agent")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the active catalog
    List {
        /// Free text matched against title and location
        #[arg(short, long, default_value = "")]
        query: String,

        #[arg(long, default_value_t = 0)]
        min_price: u64,

        #[arg(long)]
        max_price: Option<u64>,

        #[arg(long, default_value_t = 0.0)]
        min_rooms: f32,

        /// Apartment, House, Penthouse, Villa, Plot or All
        #[arg(short = 't', long = "type", default_value = "All")]
        property_type: TypeFilter,
    },

    /// Show featured listings
    Featured,

    /// Show one active listing in full
    Show { id: String },

    /// Show the trash (admin)
    Trash,

    /// Add a listing from a JSON draft file (admin)
    Add {
        file: PathBuf,

        #[command(flatten)]
        images: ImageEdits,
    },

    /// Replace a listing from a JSON draft file carrying its id (admin)
    Update {
        file: PathBuf,

        #[command(flatten)]
        images: ImageEdits,
    },

    /// Print an active listing as an editable JSON draft (admin)
    Export { id: String },

    /// Move a listing to the trash (admin)
    Delete { id: String },

    /// Bring a listing back from the trash (admin)
    Restore { id: String },

    /// Delete a trashed listing permanently (admin)
    Purge {
        id: String,

        /// Confirm; this cannot be undone
        #[arg(long)]
        yes: bool,
    },

    /// Enter the admin password and remember the session
    Login { password: String },

    /// Forget the admin session
    Logout,

    /// Ask the assistant a question about the listings
    Ask { question: Vec<String> },

    /// Print a WhatsApp link to contact the agent
    Contact {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        /// Ask about this listing instead of a general consultation
        #[arg(long)]
        listing: Option<String>,
    },
}

/// Image changes applied to a draft before it is saved
#[derive(clap::Args)]
struct ImageEdits {
    /// Remove the image at this position
    #[arg(long)]
    drop_image: Option<usize>,

    /// Append an image URL (repeatable)
    #[arg(long = "image")]
    add: Vec<String>,

    /// Embed a local photo (repeatable)
    #[arg(long = "image-file")]
    files: Vec<PathBuf>,

    /// Make the image at this position the cover
    #[arg(long)]
    cover: Option<usize>,
}

impl ImageEdits {
    fn apply(&self, draft: &mut PropertyDraft) -> Result<()> {
        if let Some(index) = self.drop_image {
            draft.remove_image(index)?;
        }
        for url in &self.add {
            draft.add_image_url(url);
        }
        for path in &self.files {
            draft.add_image_file(path)?;
        }
        if let Some(index) = self.cover {
            draft.set_primary_image(index)?;
        }
        Ok(())
    }
}

impl Commands {
    fn needs_admin(&self) -> bool {
        matches!(
            self,
            Commands::Trash
                | Commands::Add { .. }
                | Commands::Update { .. }
                | Commands::Export { .. }
                | Commands::Delete { .. }
                | Commands::Restore { .. }
                | Commands::Purge { .. }
        )
    }
}

fn print_listing(i: usize, property: &Property) {
    let star = if property.is_featured() { " ★" } else { "" };
    println!("{}. {}{} ({})", i + 1, property.title, star, format_price(property.price));
    println!("   {} · {}", property.location, property.property_type.display_name());
    println!(
        "   {} חדרים, {} חדרי רחצה, {} מ\"ר",
        property.bedrooms, property.bathrooms, property.area
    );
    println!("   ID: {}", property.id);
    println!();
}

fn print_details(property: &Property) {
    print_listing(0, property);
    println!("{}", property.description);
    println!();
    if let Some(video) = &property.video_url {
        println!("Video: {}", video);
    }
    if let Some(cover) = property.primary_image() {
        println!("Cover: {}", image_label(cover));
    }
    for image in property.images.iter().skip(1) {
        println!("Image: {}", image_label(image));
    }
}

/// Embedded photos are shown by type and size only
fn image_label(image: &str) -> String {
    match image.split_once(',') {
        Some((header, payload)) if header.starts_with("data:") => {
            format!("{} ({} chars embedded)", header, payload.len())
        }
        _ => image.to_string(),
    }
}

fn read_draft(path: &Path) -> Result<PropertyDraft> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid listing in {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load()?;

    let storage = FileStorage::open(&config.data_dir)?;
    let mut store = ListingStore::open(storage)?;
    let gate = AdminGate::new(config.admin_password.clone());

    if cli.command.needs_admin() && !gate.is_authenticated(store.storage()) {
        anyhow::bail!("Admin access required, run `listing-desk login <password>` first");
    }

    match cli.command {
        Commands::List {
            query,
            min_price,
            max_price,
            min_rooms,
            property_type,
        } => {
            let mut view = CatalogView::new(FilterCriteria {
                search_query: query,
                min_price,
                max_price,
                min_rooms,
                property_type,
            });
            view.refresh(&store);

            if view.visible().is_empty() {
                println!("לא נמצאו נכסים התואמים את החיפוש");
            }
            for (i, property) in view.visible().iter().enumerate() {
                print_listing(i, property);
            }
            info!("{} of {} listings match", view.visible().len(), store.active().len());
        }

        Commands::Featured => {
            for (i, property) in catalog::filter::featured(store.active()).into_iter().enumerate() {
                print_listing(i, property);
            }
        }

        Commands::Show { id } => {
            let property = store
                .get(&id)
                .with_context(|| format!("No active listing with id {}", id))?;
            print_details(property);
        }

        Commands::Trash => {
            if store.trashed().is_empty() {
                println!("סל המיחזור ריק");
            }
            for (i, property) in store.trashed().iter().enumerate() {
                print_listing(i, property);
            }
        }

        Commands::Add { file, images } => {
            let mut draft = read_draft(&file)?;
            images.apply(&mut draft)?;
            let property = draft.into_property()?;
            let id = store.add(property)?;
            println!("Added listing {}", id);
        }

        Commands::Update { file, images } => {
            let mut draft = read_draft(&file)?;
            images.apply(&mut draft)?;
            let property = draft.into_property()?;
            if property.id.is_empty() {
                anyhow::bail!("{} has no id to update", file.display());
            }
            let id = property.id.clone();
            if store.update(property)? {
                println!("Updated listing {}", id);
            } else {
                println!("No active listing with id {}", id);
            }
        }

        Commands::Export { id } => {
            let property = store
                .get(&id)
                .with_context(|| format!("No active listing with id {}", id))?;
            let draft = PropertyDraft::from(property.clone());
            println!("{}", serde_json::to_string_pretty(&draft)?);
        }

        Commands::Delete { id } => {
            if store.delete(&id)? {
                println!("Moved {} to the trash", id);
            } else {
                println!("No active listing with id {}", id);
            }
        }

        Commands::Restore { id } => {
            if store.restore(&id)? {
                println!("Restored {}", id);
            } else {
                println!("No trashed listing with id {}", id);
            }
        }

        Commands::Purge { id, yes } => {
            if !yes {
                anyhow::bail!("מחיקה לצמיתות? לא ניתן יהיה לשחזר. Re-run with --yes to confirm");
            }
            if store.purge_forever(&id)? {
                println!("Permanently deleted {}", id);
            } else {
                println!("No trashed listing with id {}", id);
            }
        }

        Commands::Login { password } => {
            if gate.login(store.storage_mut(), &password, true)? {
                println!("Logged in");
            } else {
                anyhow::bail!("סיסמה שגויה");
            }
        }

        Commands::Logout => {
            gate.logout(store.storage_mut())?;
            println!("Logged out");
        }

        Commands::Ask { question } => {
            let advisor = GeminiAdvisor::new(config.gemini_settings())?;
            if config.gemini_api_key.is_none() {
                warn!("GEMINI_API_KEY is not set, answers will fall back");
            }
            let mut desk = AdviceDesk::new(advisor, &config.agent_name);
            match desk.ask(&question.join(" "), store.active()).await {
                Some(reply) => println!("{}", reply),
                None => println!("{}", desk.transcript()[0].content),
            }
        }

        Commands::Contact {
            name,
            phone,
            listing,
        } => {
            let links = ContactLinks::new(config.contact_phone.clone(), config.agent_name.clone());
            let message = match listing {
                Some(id) => {
                    let property = store
                        .get(&id)
                        .with_context(|| format!("No active listing with id {}", id))?;
                    links.listing_message(property)
                }
                None => links.consultation_message(name.as_deref(), phone.as_deref()),
            };
            println!("{}", links.whatsapp_url(&message)?);
        }
    }

    Ok(())
}
