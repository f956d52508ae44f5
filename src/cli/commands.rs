use crate::model::ParaType;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "para")]
#[command(
    author,
    version,
    about = "PARA note workflows for markdown vaults: create, archive, restore, complete"
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault directory (searches upward for .para.toml by default)
    #[arg(long, global = true, env = "PARA_VAULT")]
    pub vault: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write JSON logs to this file (rotated daily)
    #[arg(long, global = true, env = "PARA_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the PARA folders, templates and .para.toml
    Init {
        /// Put each new project in its own folder
        #[arg(long)]
        folder_structure: bool,

        /// Do not create a companion folder for new areas
        #[arg(long)]
        no_companion_dir: bool,
    },

    /// Create a new project, area or resource from its template
    #[command(visible_alias = "c", visible_alias = "new")]
    Create {
        /// Type of note
        #[arg(value_enum)]
        r#type: ParaTypeArg,

        /// Name of the note (prompted for when omitted)
        name: Option<String>,

        /// Area the project belongs to
        #[arg(short, long)]
        area: Option<String>,

        /// Open the note after creating it
        #[arg(long)]
        open: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Move an active note into the archive
    Archive {
        /// Path of the note
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Bring an archived note back to its folder
    Restore {
        /// Path of the archived note (pick from the archive when omitted)
        file: Option<PathBuf>,

        /// Only offer archived notes of this type
        #[arg(short = 't', long, value_enum)]
        r#type: Option<ParaTypeArg>,

        /// Only offer archived notes whose name contains this text
        #[arg(short, long)]
        query: Option<String>,

        /// Choose the n-th match (1-based) without prompting
        #[arg(long)]
        pick: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Mark an active project completed and archive it
    #[command(visible_alias = "done")]
    Complete {
        /// Path of the project note
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List PARA notes
    #[command(visible_alias = "ls")]
    List {
        /// Only list archived notes
        #[arg(long)]
        archived: bool,

        /// Filter by type
        #[arg(short = 't', long, value_enum)]
        r#type: Option<ParaTypeArg>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ParaTypeArg {
    Project,
    Area,
    Resource,
}

impl From<ParaTypeArg> for ParaType {
    fn from(arg: ParaTypeArg) -> Self {
        match arg {
            ParaTypeArg::Project => ParaType::Project,
            ParaTypeArg::Area => ParaType::Area,
            ParaTypeArg::Resource => ParaType::Resource,
        }
    }
}
