#[cfg(feature = "yup-oauth2")]
use gslides_markdown::{client, SlideGeneratorBuilder};

#[cfg(feature = "yup-oauth2")]
use dotenvy::dotenv;

#[cfg(feature = "yup-oauth2")]
use std::{env, fs};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    #[cfg(feature = "yup-oauth2")]
    {
        env_logger::init();
        dotenv().ok();

        let args: Vec<String> = env::args().collect();
        if args.len() < 3 {
            eprintln!(
                "Usage: cargo run --example generate_slides --features yup-oauth2 -- <PRESENTATION_ID> <MARKDOWN_FILE> [--erase]"
            );
            eprintln!(
                "Ensure GOOGLE_APPLICATION_CREDENTIALS is set in your environment or .env file."
            );
            return Ok(());
        }
        let presentation_id = &args[1];
        let markdown = fs::read_to_string(&args[2])?;
        let erase = args.iter().any(|a| a == "--erase");

        let http_client = reqwest::Client::new();
        let mut generator = SlideGeneratorBuilder::new().set_erase(erase).build();

        let presentation =
            client::generate_slides_sa(presentation_id, &markdown, &mut generator, &http_client)
                .await?;
        println!(
            "Presentation {} now has {} slides",
            presentation.presentation_id,
            presentation.slides.as_ref().map_or(0, Vec::len)
        );
    }

    #[cfg(not(feature = "yup-oauth2"))]
    {
        println!("This example requires the 'yup-oauth2' feature.");
        println!("Try running with: cargo run --example generate_slides --features yup-oauth2");
    }

    Ok(())
}
