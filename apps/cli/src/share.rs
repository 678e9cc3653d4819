//! Share sheet seam. The platform share mechanism is an external
//! collaborator; the CLI stands in with stdout.

use anyhow::Result;

pub trait ShareSink {
    fn present(&self, text: &str) -> Result<()>;
}

/// Writes the formatted share text to stdout.
pub struct StdoutShare;

impl ShareSink for StdoutShare {
    fn present(&self, text: &str) -> Result<()> {
        println!("{text}");
        Ok(())
    }
}
