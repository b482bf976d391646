//! Scratch command - disposable working directories

use anyhow::anyhow;
use clap::Args;
use gt_core::Target;

use super::Session;

/// Create a scratchpad (this week's by default) and print its path
#[derive(Args, Debug)]
pub struct ScratchArgs {
    /// Scratchpad name, e.g. `2021w05`
    name: Option<String>,

    /// List existing scratchpads instead
    #[arg(short, long)]
    list: bool,
}

impl ScratchArgs {
    pub async fn execute(&self, session: &Session) -> anyhow::Result<()> {
        let resolver = session.resolver();

        if self.list {
            for scratch in resolver.get_scratchpads()? {
                println!("{}", scratch.name());
            }
            return Ok(());
        }

        let scratch = match self.name.as_deref() {
            Some(name) => resolver
                .get_scratchpad(name)
                .ok_or_else(|| anyhow!("'{}' is not a valid scratchpad name", name))?,
            None => resolver.current_scratchpad(),
        };

        session.local_initializer().create_scratchpad(&scratch).await?;
        println!("{}", scratch.path().display());

        Ok(())
    }
}
