use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = directory_api::Args::parse();

	directory_api::run(args).await
}
