//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

/// Patch the Xilinx AXI VIP package so simulations can run without the
/// precompiled `xilinx_vip` library.
#[derive(Parser, Debug)]
#[command(name = "vippatch", version, about)]
pub struct Args {
    /// Vivado data directory (e.g. ~/Xilinx/Vivado/2021.2/data)
    #[arg(long, env = "VIVADO_DATA_DIR")]
    pub data_dir: PathBuf,

    /// Unified diff to apply to axi_vip_pkg.sv
    #[arg(long)]
    pub patch_file: PathBuf,

    /// Recompile the patched package into this work directory with xvlog
    /// and register it back in xsim.ini
    #[arg(long)]
    pub compile_into: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
