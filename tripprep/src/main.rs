use clap::Parser;
use tripprep::{app::PrepApp, error::PipelineError};

fn main() -> Result<(), PipelineError> {
    env_logger::init();
    let args = PrepApp::parse();
    args.op.run()
}
