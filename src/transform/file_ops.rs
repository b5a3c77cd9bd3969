//! Steps that touch the filesystem directly.
//!
//! - `Read`: load a regular file into the context buffer
//! - `ModTime`: skip entries whose destination is already newer
//! - `Write`: write the buffer to the destination (terminal)
//! - `Symlink`: link the destination back to the source (terminal)
//! - `Ignore`: log only

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Local};
use log::debug;

use super::context::TransformContext;
use super::step::{Flow, Outcome, StepEnv};
use crate::error::{Error, Result};

/// Logs the entry and keeps going.
///
/// Despite the name this does not end the chain; later steps still run.
pub fn ignore(ctx: &TransformContext) -> Flow {
    debug!("Ignoring {}", ctx.original_path.display());
    Flow::Continue
}

/// Reads a regular file into the context buffer.
///
/// Directories and symlinks stop the chain without an error.
pub fn read(ctx: &mut TransformContext) -> Result<Flow> {
    if !ctx.metadata.file_type().is_file() {
        return Ok(Flow::Stop(Outcome::Stopped));
    }

    ctx.content = fs::read(&ctx.original_path).map_err(|e| Error::io(&ctx.original_path, e))?;
    Ok(Flow::Continue)
}

/// Stops the chain when the destination is strictly newer than the source.
///
/// A destination that cannot be stat-ed (usually because it does not exist
/// yet) never stops the chain.
pub fn mod_time(ctx: &TransformContext) -> Flow {
    let Ok(dest) = fs::symlink_metadata(&ctx.output_path) else {
        return Flow::Continue;
    };

    let (Ok(src_time), Ok(dest_time)) = (ctx.metadata.modified(), dest.modified()) else {
        return Flow::Continue;
    };

    if src_time < dest_time {
        debug!(
            "Skipping {}: source modified {} is older than destination modified {}",
            ctx.relative_path.display(),
            format_time(src_time),
            format_time(dest_time)
        );
        return Flow::Stop(Outcome::Stopped);
    }

    Flow::Continue
}

/// Writes the buffered content to the destination path.
pub fn write(ctx: &TransformContext, env: &mut StepEnv<'_>) -> Result<Flow> {
    let dest_path = &ctx.output_path;
    debug!("Will write {} bytes to {}", ctx.content.len(), dest_path.display());

    if env.dry_run {
        return Ok(Flow::Stop(Outcome::Written));
    }

    env.caches.directories.ensure_parent(dest_path)?;

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(dest_path).map_err(|e| Error::io(dest_path, e))?;
    file.write_all(&ctx.content).map_err(|e| Error::io(dest_path, e))?;

    Ok(Flow::Stop(Outcome::Written))
}

/// Links the destination path to the original source path.
///
/// Link failures are logged and otherwise ignored.
pub fn symlink(ctx: &TransformContext, env: &StepEnv<'_>) -> Flow {
    debug!(
        "Will create a symlink from {} to {}",
        ctx.original_path.display(),
        ctx.output_path.display()
    );

    if env.dry_run {
        return Flow::Stop(Outcome::Linked);
    }

    match create_symlink(&ctx.original_path, &ctx.output_path, ctx.metadata.is_dir()) {
        Ok(()) => Flow::Stop(Outcome::Linked),
        Err(e) => {
            debug!("Symlink {} not created: {}", ctx.output_path.display(), e);
            Flow::Stop(Outcome::Stopped)
        }
    }
}

#[cfg(unix)]
fn create_symlink(target: &Path, link: &Path, _is_dir: bool) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn create_symlink(target: &Path, link: &Path, is_dir: bool) -> std::io::Result<()> {
    if is_dir {
        std::os::windows::fs::symlink_dir(target, link)
    } else {
        std::os::windows::fs::symlink_file(target, link)
    }
}

fn format_time(time: SystemTime) -> String {
    DateTime::<Local>::from(time).format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}
