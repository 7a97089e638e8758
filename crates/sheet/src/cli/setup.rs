use clap::{ArgAction, Parser, Subcommand};
use sheetapp::model::Difficulty;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "sheet",
    bin_name = "sheet",
    version,
    disable_help_subcommand = true,
    after_help = "Entities are addressed by path (2, 2.1, 2.1.3) as shown by `sheet list`, or by id."
)]
#[command(about = "Track progress through a study sheet", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to $SHEET_DATA_DIR, then the OS data dir)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count, help_heading = "Options")]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Core(CoreCommands),

    #[command(flatten)]
    Edit(EditCommands),

    #[command(flatten)]
    Data(DataCommands),

    #[command(flatten)]
    Misc(MiscCommands),
}

#[derive(Subcommand, Debug)]
pub enum CoreCommands {
    /// List the sheet as a tree
    #[command(alias = "ls", display_order = 1)]
    List {
        /// Match question, tag, subtopic or topic text
        #[arg(short, long)]
        search: Option<String>,

        /// Show favorites only
        #[arg(short, long)]
        favorites: bool,

        /// Show questions carrying this tag
        #[arg(short, long)]
        tag: Option<String>,
    },

    /// Show progress statistics
    #[command(display_order = 2)]
    Stats,

    /// List every tag in use
    #[command(display_order = 3)]
    Tags,

    /// Toggle completion of questions
    #[command(display_order = 4)]
    Done {
        /// Question paths or ids (e.g. 1.1.3)
        #[arg(required = true, num_args = 1..)]
        targets: Vec<String>,
    },

    /// Toggle favorite on questions
    #[command(display_order = 5)]
    Fav {
        /// Question paths or ids (e.g. 1.1.3)
        #[arg(required = true, num_args = 1..)]
        targets: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum EditCommands {
    /// Manage topics
    #[command(subcommand, display_order = 10)]
    Topic(TopicCommands),

    /// Manage subtopics
    #[command(subcommand, alias = "sub", display_order = 11)]
    Subtopic(SubTopicCommands),

    /// Manage questions
    #[command(subcommand, alias = "q", display_order = 12)]
    Question(QuestionCommands),

    /// Add or remove question tags
    #[command(subcommand, display_order = 13)]
    Tag(TagCommands),

    /// Per-question stopwatch
    #[command(subcommand, display_order = 14)]
    Timer(TimerCommands),
}

#[derive(Subcommand, Debug)]
pub enum TopicCommands {
    /// Append a topic
    Add {
        /// Title words (joined with spaces)
        #[arg(required = true, trailing_var_arg = true)]
        title: Vec<String>,
    },
    /// Rename a topic
    Edit {
        target: String,
        #[arg(required = true, trailing_var_arg = true)]
        title: Vec<String>,
    },
    /// Delete a topic with everything under it
    #[command(alias = "rm")]
    Delete { target: String },
    /// Collapse or expand a topic
    Toggle { target: String },
    /// Move a topic to a 1-based position
    #[command(alias = "mv")]
    Move { target: String, to: usize },
}

#[derive(Subcommand, Debug)]
pub enum SubTopicCommands {
    /// Append a subtopic to a topic
    Add {
        /// Topic path or id
        topic: String,
        #[arg(required = true, trailing_var_arg = true)]
        title: Vec<String>,
    },
    /// Rename a subtopic
    Edit {
        target: String,
        #[arg(required = true, trailing_var_arg = true)]
        title: Vec<String>,
    },
    /// Delete a subtopic with its questions
    #[command(alias = "rm")]
    Delete { target: String },
    /// Collapse or expand a subtopic
    Toggle { target: String },
    /// Move a subtopic to a 1-based position within its topic
    #[command(alias = "mv")]
    Move { target: String, to: usize },
}

#[derive(Subcommand, Debug)]
pub enum QuestionCommands {
    /// Append a question to a subtopic
    Add {
        /// Subtopic path or id (e.g. 2.1)
        sub_topic: String,

        /// easy, medium or hard
        #[arg(short, long, default_value = "medium")]
        difficulty: Difficulty,

        /// Tag to attach (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// Problem link
        #[arg(long)]
        url: Option<String>,

        /// Solution link
        #[arg(long)]
        solution: Option<String>,

        #[arg(required = true, trailing_var_arg = true)]
        title: Vec<String>,
    },
    /// Rename a question
    Edit {
        target: String,
        #[arg(required = true, trailing_var_arg = true)]
        title: Vec<String>,
    },
    /// Delete a question
    #[command(alias = "rm")]
    Delete { target: String },
    /// Move a question to a 1-based position within its subtopic
    #[command(alias = "mv")]
    Move { target: String, to: usize },
    /// Show or replace a question's notes
    Notes {
        target: String,

        /// Clear the notes
        #[arg(long, conflicts_with = "text")]
        clear: bool,

        /// New notes (omit to print the current notes)
        #[arg(trailing_var_arg = true)]
        text: Vec<String>,
    },
    /// Open the problem (or solution) link in the browser
    Open {
        target: String,

        /// Open the solution link instead
        #[arg(long)]
        solution: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum TagCommands {
    /// Tag a question
    Add {
        target: String,
        #[arg(required = true, num_args = 1..)]
        tags: Vec<String>,
    },
    /// Remove tags from a question
    #[command(alias = "rm")]
    Remove {
        target: String,
        #[arg(required = true, num_args = 1..)]
        tags: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum TimerCommands {
    /// Start (or restart) a question's timer
    Start { target: String },
    /// Stop a timer, banking the time and completing the question
    Stop { target: String },
    /// Zero a question's time
    Reset { target: String },
    /// Show one question's time, or every running timer
    Show { target: Option<String> },
}

#[derive(Subcommand, Debug)]
pub enum DataCommands {
    /// Fetch the source sheet and seed it (first run only)
    #[command(display_order = 20)]
    Fetch {
        /// Source URL (defaults to the configured source_url)
        #[arg(long)]
        url: Option<String>,
    },

    /// Seed from a local source document (first run only)
    #[command(display_order = 21)]
    Seed {
        /// Source document in the remote API's JSON layout
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Export progress as JSON
    #[command(display_order = 22)]
    Export {
        /// Directory to write into
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Replace all progress with an exported file
    #[command(display_order = 23)]
    Import { file: PathBuf },

    /// Delete all progress and goals
    #[command(display_order = 24)]
    Reset {
        /// Skip the confirmation guard
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum MiscCommands {
    /// Collapse every topic and subtopic
    #[command(display_order = 30)]
    Collapse,

    /// Expand every topic and subtopic
    #[command(display_order = 31)]
    Expand,

    /// Toggle between dark and light output
    #[command(display_order = 32)]
    Theme,

    /// Study goals checklist
    #[command(subcommand, display_order = 33)]
    Goal(GoalCommands),

    /// Get or set configuration
    #[command(display_order = 34)]
    Config {
        /// Configuration key
        key: Option<String>,
        /// New value
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum GoalCommands {
    /// Add a goal to the top of the list
    Add {
        #[arg(required = true, trailing_var_arg = true)]
        text: Vec<String>,
    },
    /// List goals
    #[command(alias = "ls")]
    List,
    /// Toggle a goal done (by position or id)
    Toggle { target: String },
    /// Delete a goal (by position or id)
    #[command(alias = "rm")]
    Delete { target: String },
    /// Remove every completed goal
    Clear,
}
