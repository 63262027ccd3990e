use std::fs::File;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use nrbf_sdk::Deserializer;

#[derive(Parser)]
#[command(name = "nrbf-dump", about = "Dump and query .NET Remoting Binary Format streams")]
struct Args {
    /// NRBF byte stream to decode.
    file: PathBuf,

    /// Query path (`stream/displayName/segment`) to resolve and print
    #[arg(long)]
    path: Option<String>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let file = File::open(&args.file).with_context(|| format!("opening {}", args.file.display()))?;
    let des = Deserializer::open(file).with_context(|| format!("decoding {}", args.file.display()))?;

    print!("{}", des.dump());

    if let Some(path) = args.path {
        match des.resolve(&path) {
            Some(value) => println!("{path} = {value:?}"),
            None => println!("{path}: not found"),
        }
    }

    Ok(())
}
