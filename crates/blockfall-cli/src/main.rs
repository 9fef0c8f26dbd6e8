mod command;
mod config;

fn main() -> anyhow::Result<()> {
    command::run()
}
