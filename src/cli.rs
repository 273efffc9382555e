use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "ucast",
    about = "Web control panel for Chromecast receivers — drives catt, serves your media",
    long_about = None,
    version,
)]
pub struct Args {
    /// Directory holding the media files to serve and cast [default: ./media]
    #[arg(value_name = "MEDIA_DIR")]
    pub media_dir: Option<PathBuf>,

    /// HTTP port to listen on [default: 5000]
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Path to the catt executable [default: catt from PATH]
    #[arg(long, value_name = "BIN")]
    pub catt: Option<PathBuf>,

    /// Path to the ffmpeg executable used for video thumbnails [default: ffmpeg from PATH]
    #[arg(long, value_name = "BIN")]
    pub ffmpeg: Option<PathBuf>,

    /// Path to TOML config file (overrides default search: ./ucast.toml, ~/.config/ucast/config.toml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Bind to localhost only (127.0.0.1) instead of all interfaces (0.0.0.0)
    #[arg(long)]
    pub localhost: bool,
}
