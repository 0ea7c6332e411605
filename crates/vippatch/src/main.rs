//! vippatch - patch the Xilinx AXI VIP for simulator use without the
//! precompiled `xilinx_vip` library.
//!
//! Steps, in order:
//! 1. remove the `xilinx_vip` entry from `xsim.ini`
//! 2. apply the unified diff to `axi_vip_pkg.sv` (a `.bak` copy is left
//!    next to it)
//! 3. optionally recompile the patched package with `xvlog` and register
//!    the result back in `xsim.ini`
//!
//! Any failure halts the pipeline; there is no retry.

mod cli;
mod compile;
mod xsim_ini;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use tracing::info;

use vippatch_udiff::Patcher;

const LIB_NAME: &str = "xilinx_vip";

fn main() -> Result<()> {
    let args = cli::Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("vippatch={level}").parse()?)
                .add_directive(format!("vippatch_udiff={level}").parse()?),
        )
        .init();

    info!(data_dir = %args.data_dir.display(), "0. parameters");

    let xsim_ini = args.data_dir.join("xsim/xsim.ini");
    info!("1. removing `{LIB_NAME}` from xsim.ini");
    let removed = xsim_ini::remove_library(&xsim_ini, LIB_NAME)?;
    ensure!(
        removed == 1,
        "expected exactly one {LIB_NAME} line in {}, removed {removed}",
        xsim_ini.display()
    );

    info!("2. patching axi_vip_pkg.sv");
    let pkg = args.data_dir.join("xilinx_vip/hdl/axi_vip_pkg.sv");
    Patcher::patch(&pkg, &args.patch_file)
        .with_context(|| format!("patching {}", pkg.display()))?;

    if let Some(work_dir) = &args.compile_into {
        info!("3. recompiling the patched package");
        compile::compile_library(&[pkg], work_dir)?;
        xsim_ini::append_library(&xsim_ini, LIB_NAME, work_dir)?;
    }

    Ok(())
}
