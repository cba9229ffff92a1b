use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use zxq_core::{MachineKind, QuicksaveSettings, SaveLayout};

#[derive(Parser, Debug)]
#[command(
    name = "zxq",
    about = "Inspect and back up ZX Spectrum quicksave slot trees",
    version
)]
struct Cli {
    #[command(flatten)]
    opts: CommonOpts,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(ClapArgs, Debug)]
struct CommonOpts {
    /// Emulator config directory containing the savestates tree
    #[arg(long, global = true)]
    config_root: Option<PathBuf>,
    /// Savestate extension, leading dot included
    #[arg(long, global = true, default_value = ".szx")]
    format: String,
    /// Savestates are segregated per machine
    #[arg(long, global = true, default_value_t = false)]
    per_machine: bool,
    /// Machine name or alias (48, 128, +3, pentagon, ...)
    #[arg(long, global = true, default_value = "48")]
    machine: String,
    /// Path of the loaded program (tape/disk image)
    #[arg(long, global = true)]
    program: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Print the save directory derived for the loaded program
    Dir,
    /// List occupied slots for the loaded program
    List(ListArgs),
    /// Print menu labels for occupied slots
    Labels,
    /// Report whether any save exists for the loaded program
    Exists,
    /// List every program with saves under the savestates tree
    Overview(ListArgs),
    /// Zip the savestates tree next to itself
    Backup,
}

#[derive(ClapArgs, Debug)]
struct ListArgs {
    /// Emit JSON instead of a table
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() {
    let cli = Cli::parse();
    let layout = build_layout(&cli.opts);
    match cli.cmd {
        Cmd::Dir => cmd_dir(&layout),
        Cmd::List(a) => cmd_list(&layout, a),
        Cmd::Labels => cmd_labels(&layout),
        Cmd::Exists => cmd_exists(&layout),
        Cmd::Overview(a) => cmd_overview(&layout, a),
        Cmd::Backup => cmd_backup(&layout),
    }
}

fn build_layout(opts: &CommonOpts) -> SaveLayout {
    let machine = MachineKind::from_name(&opts.machine).unwrap_or_else(|| {
        eprintln!("unknown machine: {}", opts.machine);
        std::process::exit(2);
    });
    let settings = QuicksaveSettings {
        config_root: opts.config_root.clone(),
        format: opts.format.clone(),
        per_machine: opts.per_machine,
        ..QuicksaveSettings::default()
    };
    let mut layout = SaveLayout::new(settings, machine);
    layout.set_loaded_program(opts.program.clone());
    layout
}

fn need_save_dir(layout: &SaveLayout) -> PathBuf {
    layout.save_dir().unwrap_or_else(|| {
        eprintln!("quicksave inactive: pass --config-root and --program");
        std::process::exit(2);
    })
}

fn savestates_root(layout: &SaveLayout) -> PathBuf {
    match &layout.settings.config_root {
        Some(root) => root.join(zxq_core::paths::SAVESTATES_DIR),
        None => {
            eprintln!("quicksave inactive: pass --config-root");
            std::process::exit(2);
        }
    }
}

fn cmd_dir(layout: &SaveLayout) {
    println!("{}", need_save_dir(layout).display());
}

fn cmd_list(layout: &SaveLayout, args: ListArgs) {
    need_save_dir(layout);
    let entries = layout.occupied_slots();
    if args.json {
        let v = zxq_core::report::slots_json(&entries);
        println!("{}", serde_json::to_string_pretty(&v).unwrap());
        return;
    }
    for e in &entries {
        println!(
            "{:02}\t{}\t{} bytes",
            e.slot,
            e.modified.as_deref().unwrap_or("-"),
            e.bytes
        );
    }
}

fn cmd_labels(layout: &SaveLayout) {
    need_save_dir(layout);
    for e in layout.occupied_slots() {
        if let Some(label) = layout.label(e.slot) {
            println!("{}", label);
        }
    }
}

fn cmd_exists(layout: &SaveLayout) {
    let dir = need_save_dir(layout);
    let found = zxq_core::scan::directory_has_saves(&dir, &layout.settings.format);
    println!("{}", if found { "yes" } else { "no" });
    if !found {
        std::process::exit(1);
    }
}

fn cmd_overview(layout: &SaveLayout, args: ListArgs) {
    let root = savestates_root(layout);
    let programs = zxq_core::scan::tree_overview(&root, &layout.settings.format);
    if args.json {
        let v = zxq_core::report::overview_json(&programs);
        println!("{}", serde_json::to_string_pretty(&v).unwrap());
        return;
    }
    for p in &programs {
        let slots: Vec<String> = p.slots.iter().map(|s| format!("{:02}", s)).collect();
        println!("{}\t[{}]", p.program, slots.join(", "));
    }
}

fn cmd_backup(layout: &SaveLayout) {
    let root = savestates_root(layout);
    match zxq_core::backup::zip_backup_tree(&root, &layout.settings.format) {
        Ok(dest) => println!("{}", dest.display()),
        Err(e) => {
            eprintln!("backup error: {}", e);
            std::process::exit(2);
        }
    }
}
