use gslides_markdown::extract_slides;
use std::{env, fs};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: cargo run --example compile_markdown -- <MARKDOWN_FILE>");
        return Ok(());
    }

    let markdown = fs::read_to_string(&args[1])?;
    let slides = extract_slides(&markdown)?;
    println!("{}", serde_json::to_string_pretty(&slides)?);
    eprintln!("{} slides", slides.len());
    Ok(())
}
