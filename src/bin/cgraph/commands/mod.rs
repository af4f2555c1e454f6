mod fuse;
mod render;

use fuse::run_fuse;
use render::run_render;

use anyhow::Result;

use crate::cli::Command;
use crate::display::Context;

pub fn dispatch(command: Command, ctx: Context) -> Result<()> {
    match command {
        Command::Fuse(args) => run_fuse(args, ctx),
        Command::Render(args) => run_render(args, ctx),
    }
}
