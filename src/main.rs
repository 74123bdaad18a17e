mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use photomania::{ApiConfig, ImageSize, PhotoClient};

/// Browse a popular-photos feed from the terminal
#[derive(Parser)]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Page through the popular feed and print it as a grid
    Browse {
        /// Number of pages to request
        #[arg(short, long, default_value_t = 1)]
        pages: u32,
        /// Photo ids per grid row
        #[arg(short, long, default_value_t = 3)]
        columns: usize,
        /// Fetch the detail record of every photo after paging
        #[arg(long)]
        details: bool,
    },
    /// Show the detail record of one photo
    Info {
        id: u64,
        /// Image size tier: tiny, small, medium, large, xlarge
        #[arg(short, long, default_value = "large")]
        size: ImageSize,
        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the comments on one photo
    Comments {
        id: u64,
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Fetch and decode one image
    Image {
        url: String,
        /// Display scale factor the image is decoded for
        #[arg(short, long, default_value_t = 1.0)]
        scale: f32,
        /// Save the decoded image here (format from the extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    photomania::logging::init_logging();
    let args = Args::parse();
    let client = PhotoClient::new(ApiConfig::from_env()?)?;

    match args.command {
        Command::Browse {
            pages,
            columns,
            details,
        } => commands::browse::cmd_browse(client, pages, columns, details),
        Command::Info { id, size, json } => commands::info::cmd_info(&client, id, size, json),
        Command::Comments { id, page } => commands::comments::cmd_comments(&client, id, page),
        Command::Image { url, scale, output } => {
            commands::image::cmd_image(client, &url, scale, output.as_deref())
        }
    }
}
