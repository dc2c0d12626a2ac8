//! CLI definitions using clap.

use std::path::PathBuf;

use clap::Parser;

use rmake::core::config::BuildArgs;

/// rmake - configure and build the rocBLAS examples with CMake
///
/// Runs two passes from the current directory: the host's default toolchain
/// into `<build-dir>/msvc`, then the alternate toolchain into
/// `<build-dir>/release` (or `debug`).
#[derive(Parser)]
#[command(name = "rmake")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Generate a Debug build for the alternate pass
    #[arg(short = 'g', long)]
    pub debug: bool,

    /// Build directory path [default: build]
    #[arg(long, alias = "build_dir", value_name = "DIR")]
    pub build_dir: Option<PathBuf>,

    /// Additional CMake define, repeatable (e.g. CMAKE_CXX_STANDARD=17)
    #[arg(long = "cmake-darg", alias = "cmake_darg", value_name = "DEFINE")]
    pub cmake_dargs: Vec<String>,

    /// Verbose build output
    #[arg(short, long)]
    pub verbose: bool,

    /// Non-standard path to a pre-built rocBLAS library
    #[arg(long, alias = "library_path", value_name = "PATH")]
    pub library_path: Option<PathBuf>,
}

impl Cli {
    /// Convert into the library's raw build arguments.
    pub fn into_build_args(self) -> BuildArgs {
        BuildArgs {
            debug: self.debug,
            build_dir: self.build_dir,
            extra_defines: self.cmake_dargs,
            verbose: self.verbose,
            library_path: self.library_path,
        }
    }
}
