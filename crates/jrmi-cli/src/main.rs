use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use jrmi_config::JmxConfig;
use jrmi_jmx::{Addressing, CallConfig, InvokeArg, InvokeArgs};
use jrmi_proto::{method_hash, Call};

#[derive(Parser)]
#[command(
    name = "jrmi",
    version,
    about = "Build JMX RMIConnection calls as JRMP call messages"
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct GlobalArgs {
    /// Config file (defaults to `jrmi.toml` in the current directory, if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Object number of the exported RMIConnectionImpl
    #[arg(long, global = true, allow_negative_numbers = true)]
    object_number: Option<i64>,
    /// UID number of the exported object's space
    #[arg(long, global = true, allow_negative_numbers = true)]
    uid_number: Option<i32>,
    /// UID time of the exported object's space
    #[arg(long, global = true, allow_negative_numbers = true)]
    uid_time: Option<i64>,
    /// UID count of the exported object's space
    #[arg(long, global = true, allow_negative_numbers = true)]
    uid_count: Option<i16>,
    /// Output encoding of the call message
    #[arg(long, global = true, value_enum, default_value_t = Format::Hex)]
    format: Format,
    /// Write to a file instead of stdout
    #[arg(long, short, global = true)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Hex,
    Raw,
}

#[derive(Subcommand)]
enum Command {
    /// `getObjectInstance(ObjectName, Subject)`
    GetObjectInstance(NameArgs),
    /// `createMBean(String, ObjectName, Subject)`
    CreateMbean(NameArgs),
    /// `invoke(ObjectName, String, MarshalledObject, String[], Subject)`
    Invoke(InvokeCommandArgs),
    /// Print the RMI method hash of a method signature
    MethodHash(MethodHashArgs),
}

#[derive(Args)]
struct NameArgs {
    /// MBean object name, or class name for `create-mbean`
    #[arg(long, default_value = "")]
    name: String,
}

#[derive(Args)]
struct InvokeCommandArgs {
    /// Target MBean object name
    #[arg(long)]
    object: String,
    /// Operation name
    #[arg(long)]
    method: String,
    /// Operation parameter as `TYPE=VALUE`; repeat in declaration order
    #[arg(long = "arg", value_name = "TYPE=VALUE")]
    args: Vec<InvokeArg>,
}

#[derive(Args)]
struct MethodHashArgs {
    /// e.g. `invoke(Ljavax/management/ObjectName;...)Ljava/lang/Object;`
    signature: String,
}

fn main() {
    let cli = Cli::parse();
    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            2
        }
    };

    std::process::exit(exit_code);
}

fn run(cli: Cli) -> Result<i32> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let config = JmxConfig::discover(cli.global.config.as_deref(), &cwd)?;
    jrmi_config::init_tracing(&config.logging);

    let stub = config.stub();
    let addressing = cli.global.addressing(config.addressing);

    let call = match cli.command {
        Command::GetObjectInstance(args) => {
            stub.get_object_instance(&CallConfig::new(addressing, args.name))?
        }
        Command::CreateMbean(args) => stub.create_mbean(&CallConfig::new(addressing, args.name))?,
        Command::Invoke(args) => {
            let params: InvokeArgs = args.args.into_iter().collect();
            stub.invoke(&args.object, &args.method, &params, &addressing)?
        }
        Command::MethodHash(args) => {
            let hash = method_hash(&args.signature)?;
            write_output(cli.global.output.as_deref(), format!("{hash}\n").as_bytes())?;
            return Ok(0);
        }
    };

    write_call(&call, &cli.global)?;
    Ok(0)
}

impl GlobalArgs {
    fn addressing(&self, base: Addressing) -> Addressing {
        Addressing {
            object_number: self.object_number.unwrap_or(base.object_number),
            uid_number: self.uid_number.unwrap_or(base.uid_number),
            uid_time: self.uid_time.unwrap_or(base.uid_time),
            uid_count: self.uid_count.unwrap_or(base.uid_count),
        }
    }
}

fn write_call(call: &Call, global: &GlobalArgs) -> Result<()> {
    let bytes = call.encode()?;
    tracing::debug!(target: "jrmi.cli", len = bytes.len(), "encoded call message");
    match global.format {
        Format::Hex => {
            let mut text = hex::encode(&bytes);
            text.push('\n');
            write_output(global.output.as_deref(), text.as_bytes())
        }
        Format::Raw => write_output(global.output.as_deref(), &bytes),
    }
}

fn write_output(path: Option<&Path>, bytes: &[u8]) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, bytes)
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(bytes)?;
            stdout.flush()?;
            Ok(())
        }
    }
}
