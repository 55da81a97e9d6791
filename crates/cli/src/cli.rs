use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand};
use serde_json::Value;

use produto_client::{PageRequest, ProductDraft, ProductService};
use produto_products::page::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE};

#[derive(Debug, Parser)]
#[command(name = "produto", version, about = "Command-line client for the product API")]
pub struct Cli {
    /// API base URL [default: $PRODUTO_API_URL, then http://localhost:8080/]
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch one page of products
    List {
        #[arg(long, default_value_t = DEFAULT_PAGE)]
        page: u32,
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: u32,
    },
    /// Fetch every product
    All,
    /// Fetch one product by id
    Get { id: String },
    /// Create a product
    Create {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Replace the fields of a product
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a product by id
    Delete { id: String },
}

impl Command {
    /// Run against `service`, returning the JSON to print (if any).
    pub async fn run(&self, service: &ProductService) -> Result<Option<Value>> {
        let value = match self {
            Command::List { page, page_size } => {
                let page = service
                    .list(PageRequest::new(*page, *page_size))
                    .await
                    .context("failed to list products")?;
                serde_json::to_value(page)?
            }
            Command::All => {
                let products = service.list_all().await.context("failed to list products")?;
                serde_json::to_value(products)?
            }
            Command::Get { id } => {
                let product = service
                    .load_by_id(id.as_str())
                    .await
                    .with_context(|| format!("failed to load product {id}"))?;
                serde_json::to_value(product)?
            }
            Command::Create { name, description } => {
                let draft = draft(name, description)?;
                let product = service
                    .create(&draft)
                    .await
                    .context("failed to create product")?;
                serde_json::to_value(product)?
            }
            Command::Update {
                id,
                name,
                description,
            } => {
                let draft = draft(name, description)?;
                let product = service
                    .update(id.as_str(), &draft)
                    .await
                    .with_context(|| format!("failed to update product {id}"))?;
                serde_json::to_value(product)?
            }
            Command::Delete { id } => {
                return service
                    .delete(id.as_str())
                    .await
                    .with_context(|| format!("failed to delete product {id}"));
            }
        };

        Ok(Some(value))
    }
}

fn draft(name: &Option<String>, description: &Option<String>) -> Result<ProductDraft> {
    let mut draft = name
        .as_deref()
        .map(ProductDraft::named)
        .unwrap_or_default();
    if let Some(description) = description {
        draft = draft.with_description(description.as_str());
    }
    if draft.is_empty() {
        bail!("nothing to send: pass --name and/or --description");
    }
    Ok(draft)
}
