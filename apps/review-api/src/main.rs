use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = review_api::Args::parse();

	review_api::run(args).await
}
