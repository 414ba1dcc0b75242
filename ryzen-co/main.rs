use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ryzen_co::config::{parse_range_list, parse_u32};
use ryzen_co::orchestrator::{self, sweep::DEFAULT_BASE_MARGIN};
use ryzen_co::raw::current_arch::{CCX_PER_CCD, CORES_PER_CCX};
use ryzen_co::raw::FileEndpoint;
use ryzen_co::{
    is_privileged, ChannelConfig, CoreAddress, DispatchPolicy, Driver, DriverPaths, Smu,
    SweepConfig, Topology, WaitLimit,
};

#[derive(Parser, Debug)]
#[command(name = "ryzen-co")]
#[command(about = "Curve optimizer and PBO control through the ryzen_smu driver")]
struct Args {
    #[arg(
        long,
        global = true,
        help = "ryzen_smu sysfs directory (default: $RYZEN_SMU_ROOT or /sys/kernel/ryzen_smu_drv)"
    )]
    driver_root: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        default_value_t = 1000,
        help = "Delay between status polls while the SMU is busy"
    )]
    poll_interval_ms: u64,

    #[arg(
        long,
        global = true,
        default_value_t = 30,
        help = "Give up on a busy SMU after this many seconds"
    )]
    max_wait_secs: u64,

    #[arg(
        long,
        global = true,
        help = "Poll a busy SMU forever (overrides --max-wait-secs)"
    )]
    no_timeout: bool,

    #[arg(
        long,
        global = true,
        help = "Keep waiting for completion even if writing the opcode fails"
    )]
    lenient_dispatch: bool,

    #[arg(
        short,
        long,
        global = true,
        help = "Enable verbose logging (shows every SMU command and response)"
    )]
    verbose: bool,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(clap::Args, Debug)]
struct CoreArgs {
    #[arg(long, default_value_t = 0, help = "Core index within the CCX")]
    core: u32,

    #[arg(long, default_value_t = 0, help = "CCX index within the CCD")]
    ccx: u32,

    #[arg(long, default_value_t = 0, help = "CCD index")]
    ccd: u32,
}

impl CoreArgs {
    fn address(&self) -> CoreAddress {
        CoreAddress::new(self.core, self.ccx, self.ccd)
    }
}

#[derive(clap::Args, Debug)]
struct TopologyArgs {
    #[arg(
        long = "ccds",
        default_value = "0-1",
        help = "CCDs to visit (supports ranges and comma-separated lists: --ccds 0-1 or --ccds 0,1)",
        action = clap::ArgAction::Append
    )]
    ccds: Vec<String>,

    #[arg(long, default_value_t = CCX_PER_CCD)]
    ccx_per_ccd: u32,

    #[arg(long, default_value_t = CORES_PER_CCX)]
    cores_per_ccx: u32,
}

impl TopologyArgs {
    fn topology(&self) -> ryzen_co::Result<Topology> {
        Topology::new(
            parse_range_list(&self.ccds)?,
            self.ccx_per_ccd,
            self.cores_per_ccx,
        )
    }
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Verify the SMU version and show codename and PM table support
    Info,
    /// Print the PBO scalar
    GetPbo,
    /// Set the PBO scalar
    SetPbo { scalar: f32 },
    /// Print curve optimizer margins
    GetCo {
        #[command(flatten)]
        core: CoreArgs,

        /// Read every core of the topology instead of one
        #[arg(long)]
        all: bool,

        #[command(flatten)]
        topology: TopologyArgs,
    },
    /// Set the curve optimizer margin of one core
    SetCo {
        #[arg(allow_negative_numbers = true)]
        margin: i32,

        #[command(flatten)]
        core: CoreArgs,
    },
    /// Set the curve optimizer margin of every core
    SetCoAll {
        #[arg(allow_negative_numbers = true)]
        margin: i32,
    },
    /// Give each core a distinct margin and read it back
    Sweep {
        #[arg(long, allow_negative_numbers = true, default_value_t = DEFAULT_BASE_MARGIN)]
        base: i32,

        #[command(flatten)]
        topology: TopologyArgs,
    },
    /// Read an SMN register
    SmnRead {
        #[arg(value_parser = parse_word)]
        addr: u32,
    },
    /// Write an SMN register
    SmnWrite {
        #[arg(value_parser = parse_word)]
        addr: u32,
        #[arg(value_parser = parse_word)]
        value: u32,
    },
}

fn parse_word(s: &str) -> Result<u32, String> {
    parse_u32(s).map_err(|e| e.to_string())
}

fn check_permissions(driver: &Driver) {
    if !is_privileged() {
        eprintln!("\n⚠️  ERROR: Must be run with root privileges.\n\nRun with: sudo ryzen-co ...\n");
        std::process::exit(1);
    }

    if !driver.is_loaded() {
        eprintln!(
            "\n⚠️  ERROR: The ryzen_smu driver doesn't seem to be loaded ({} missing).\n\nRun: sudo modprobe ryzen_smu\n",
            driver.paths().version().path().display()
        );
        std::process::exit(1);
    }
}

fn channel_config(args: &Args) -> ChannelConfig {
    ChannelConfig {
        poll_interval: Duration::from_millis(args.poll_interval_ms),
        wait_limit: if args.no_timeout {
            WaitLimit::Infinite
        } else {
            WaitLimit::Bounded(Duration::from_secs(args.max_wait_secs))
        },
        dispatch: if args.lenient_dispatch {
            DispatchPolicy::Lenient
        } else {
            DispatchPolicy::Strict
        },
    }
}

fn cmd_info(driver: &Driver, smu: &Smu<FileEndpoint>) -> anyhow::Result<()> {
    let driver_version = driver.version().context("reading driver version")?;
    let version = smu
        .verify_version(&driver_version)
        .context("SMU version self-test failed")?;
    println!("SMU version: v{version}");

    let codename = driver
        .codename()
        .context("Failed to detect processor code name")?;
    println!("Processor code name: {}", codename.name());
    if !codename.is_family19h() {
        tracing::warn!(
            "{} is not a family 19h part; curve optimizer commands may not apply",
            codename.name()
        );
    }

    let pm_table = if driver.pm_table_supported() {
        "Supported"
    } else {
        "Unsupported"
    };
    println!("PM table: {pm_table}");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Setup logging based on verbose flag
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .init();

    let paths = match &args.driver_root {
        Some(root) => DriverPaths::new(root),
        None => DriverPaths::from_env(),
    };
    let driver = Driver::new(paths);

    // Check for root and the driver early
    check_permissions(&driver);

    let smu = driver.open(channel_config(&args))?;

    match &args.command {
        Cmd::Info => cmd_info(&driver, &smu)?,
        Cmd::GetPbo => {
            let scalar = smu.get_pbo_scalar().context("get_pbo_scalar")?;
            println!("PBO scalar: {scalar}");
        }
        Cmd::SetPbo { scalar } => {
            smu.set_pbo_scalar(*scalar).context("set_pbo_scalar")?;
        }
        Cmd::GetCo {
            core,
            all,
            topology,
        } => {
            if *all {
                let margins = orchestrator::snapshot(&smu, &topology.topology()?)
                    .context("get_psm_margin_core")?;
                for (address, margin) in margins {
                    println!("{address}[{:08x}]: {margin}", address.mask());
                }
            } else {
                let address = core.address();
                let margin = smu
                    .get_psm_margin_core(address)
                    .context("get_psm_margin_core")?;
                println!("{address}[{:08x}]: {margin}", address.mask());
            }
        }
        Cmd::SetCo { margin, core } => {
            smu.set_psm_margin_core(*margin, core.address())
                .context("set_psm_margin_core")?;
        }
        Cmd::SetCoAll { margin } => {
            smu.set_psm_margin_all(*margin)
                .context("set_psm_margin_all")?;
        }
        Cmd::Sweep { base, topology } => {
            let config = SweepConfig {
                topology: topology.topology()?,
                base_margin: *base,
            };
            let records = orchestrator::sweep(&smu, &config).context("sweep")?;
            for r in &records {
                println!(
                    "{}[{:08x}]: {} -> {} -> {}",
                    r.address, r.mask, r.before, r.requested, r.after
                );
            }
            let failed = records.iter().filter(|r| !r.applied()).count();
            if failed > 0 {
                bail!(
                    "{failed} of {} cores did not read back the requested margin",
                    records.len()
                );
            }
        }
        Cmd::SmnRead { addr } => {
            let value = smu.read_smn(*addr).context("read_smn")?;
            println!("0x{addr:08X}: 0x{value:08X}");
        }
        Cmd::SmnWrite { addr, value } => {
            smu.write_smn(*addr, *value).context("write_smn")?;
        }
    }

    Ok(())
}
