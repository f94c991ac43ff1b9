fn main() -> anyhow::Result<()> {
    forgeprops::cli::run_cli()
}
