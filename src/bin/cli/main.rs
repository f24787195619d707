use anyhow::{Context, Result};
use bytes::Bytes;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use site_asset_store::{
    app::create_supabase_app,
    domain::{
        models::ProvisionStatus,
        value_objects::{AssetBucket, ObjectPath},
    },
    ports::services::AssetAdminService,
    resolver::{PublicUrlResolver, ResolverConfig},
};

#[derive(Parser, Debug)]
#[command(name = "site-asset-cli")]
#[command(about = "Manage and resolve the site's image asset buckets", long_about = None)]
struct Cli {
    /// Supabase project URL
    #[arg(
        short,
        long,
        env = "SUPABASE_URL",
        default_value = "https://xvdznzsozebtzqsczked.supabase.co"
    )]
    url: String,

    /// Service-role key for administrative commands
    #[arg(long, env = "SUPABASE_SERVICE_KEY")]
    service_key: Option<String>,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve a category path to its public URL (no network)
    Resolve {
        /// Asset category (blog, gallery, general or team)
        category: AssetBucket,
        /// Path within the category, redundant prefixes allowed
        path: String,
    },

    /// Create all asset buckets that do not exist yet
    Setup,

    /// Check which asset buckets exist
    Check,

    /// Upload a single file
    Upload {
        /// Asset category (blog, gallery, general or team)
        category: AssetBucket,
        /// Local file to upload
        file: PathBuf,
        /// Remote object path, defaults to the file name
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Upload a local directory tree
    Sync {
        /// Asset category (blog, gallery, general or team)
        category: AssetBucket,
        /// Local directory to upload
        dir: PathBuf,
        /// Remote prefix to upload under
        #[arg(short, long)]
        prefix: Option<String>,
    },

    /// List objects in a bucket
    List {
        /// Asset category (blog, gallery, general or team)
        category: AssetBucket,
        /// Prefix to filter objects
        #[arg(short, long)]
        prefix: Option<String>,
    },
}

impl Cli {
    fn init_logging(&self) -> Result<()> {
        let level = match self.log_level.to_lowercase().as_str() {
            "trace" => tracing::Level::TRACE,
            "debug" => tracing::Level::DEBUG,
            "warn" => tracing::Level::WARN,
            "error" => tracing::Level::ERROR,
            _ => tracing::Level::INFO,
        };

        tracing_subscriber::fmt().with_max_level(level).init();

        Ok(())
    }

    fn service_key(&self) -> Result<String> {
        self.service_key
            .clone()
            .context("SUPABASE_SERVICE_KEY is required for administrative commands")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    cli.init_logging()?;

    match &cli.command {
        Commands::Resolve { category, path } => {
            let resolver = PublicUrlResolver::new(ResolverConfig::new(&cli.url));
            println!("{}", resolver.category_url(*category, path));
        }

        Commands::Setup => {
            let app = create_supabase_app(cli.url.clone(), cli.service_key()?)
                .await
                .context("Failed to build application")?;

            let outcomes = app.admin_service.provision_buckets().await;
            let mut failed = false;
            for outcome in &outcomes {
                match &outcome.status {
                    ProvisionStatus::Created => println!("{}: created", outcome.bucket),
                    ProvisionStatus::AlreadyExists => {
                        println!("{}: already exists", outcome.bucket)
                    }
                    ProvisionStatus::Failed(message) => {
                        failed = true;
                        println!("{}: FAILED ({})", outcome.bucket, message);
                    }
                }
            }

            if failed {
                anyhow::bail!("one or more buckets could not be created");
            }
        }

        Commands::Check => {
            let app = create_supabase_app(cli.url.clone(), cli.service_key()?)
                .await
                .context("Failed to build application")?;

            let mut missing = false;
            for check in app.admin_service.check_buckets().await {
                match (&check.error, check.exists) {
                    (Some(err), _) => {
                        missing = true;
                        println!("{}: ERROR ({})", check.bucket, err);
                    }
                    (None, true) => println!("{}: ok", check.bucket),
                    (None, false) => {
                        missing = true;
                        println!("{}: missing", check.bucket);
                    }
                }
            }

            if missing {
                anyhow::bail!("bucket check failed, run `setup` to create missing buckets");
            }
        }

        Commands::Upload {
            category,
            file,
            path,
        } => {
            let app = create_supabase_app(cli.url.clone(), cli.service_key()?)
                .await
                .context("Failed to build application")?;

            let remote = match path {
                Some(path) => path.clone(),
                None => file
                    .file_name()
                    .context("file path has no file name")?
                    .to_string_lossy()
                    .into_owned(),
            };
            let remote = ObjectPath::new(remote)?;

            let data = tokio::fs::read(file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;

            app.admin_service
                .upload_image(*category, &remote, Bytes::from(data), None)
                .await?;

            let resolver = PublicUrlResolver::new(ResolverConfig::new(&cli.url));
            info!(bucket = %category, path = %remote, "uploaded");
            println!("{}", resolver.resolve(category.remote_name(), remote.as_str()));
        }

        Commands::Sync {
            category,
            dir,
            prefix,
        } => {
            let app = create_supabase_app(cli.url.clone(), cli.service_key()?)
                .await
                .context("Failed to build application")?;

            let prefix = prefix
                .as_deref()
                .map(|p| ObjectPath::new(p.to_string()))
                .transpose()?;

            let report = app
                .admin_service
                .sync_directory(dir, *category, prefix.as_ref())
                .await?;

            println!("uploaded: {}, failed: {}", report.uploaded, report.failed);
            if report.failed > 0 {
                anyhow::bail!("{} uploads failed", report.failed);
            }
        }

        Commands::List { category, prefix } => {
            let app = create_supabase_app(cli.url.clone(), cli.service_key()?)
                .await
                .context("Failed to build application")?;

            let objects = app
                .admin_service
                .list_files(*category, prefix.as_deref())
                .await?;

            for object in &objects {
                println!("{}\t{}", object.size, object.path);
            }
            println!("{} objects", objects.len());
        }
    }

    Ok(())
}
