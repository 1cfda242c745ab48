use crate::config::Config;
use crate::error::{Error, Result};
use crate::session::Session;

use super::SourceSpec;

pub struct TuiOptions {
    pub config: Config,
    pub source: SourceSpec,
    pub json: bool,
    pub quiet: bool,
}

pub fn run(options: TuiOptions) -> Result<()> {
    if options.json {
        return Err(Error::InvalidArgument(
            "interactive viewer does not support --json".to_string(),
        ));
    }
    if options.quiet {
        return Err(Error::InvalidArgument(
            "interactive viewer does not support --quiet".to_string(),
        ));
    }
    let source = options.source.open()?;
    let session = Session::new(&options.config);
    crate::ui::task_viewer::run(session, source)
}
