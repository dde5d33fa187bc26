use clap::{Args, Parser, Subcommand, ValueEnum};
use rolodex::search::SearchFields;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rolodex", bin_name = "rolodex", version)]
#[command(about = "Command-line address book", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Open the address book of this user instead of the configured one
    #[arg(short, long, global = true, help_heading = "Options")]
    pub owner: Option<String>,

    /// Read settings from this file instead of the default rolodex.toml
    #[arg(short, long, global = true, help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new contact (birthday format: day/month)
    Add {
        name: String,
        phone: Option<String>,
        email: Option<String>,
        birthday: Option<String>,
        /// Everything after the birthday
        #[arg(trailing_var_arg = true)]
        address: Vec<String>,
    },

    /// Edit an existing contact
    Edit {
        name: String,
        #[command(subcommand)]
        op: EditOp,
    },

    /// Find contacts
    Find {
        #[arg(value_enum)]
        by: FindBy,
        /// Value to look for (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        value: Vec<String>,
        /// Fields scanned by `find in`: n name, p phone, e e-mail, b birthday, a address
        #[arg(short, long, default_value = SearchFields::DEFAULT_FLAGS)]
        fields: String,
        /// Records per page
        #[arg(short = 'n', long)]
        page_size: Option<String>,
    },

    /// Delete a contact
    Delete { name: String },

    /// Show the phone numbers of a contact
    Phone { name: String },

    /// Show the e-mails of a contact
    Email { name: String },

    /// Show the birthday of a contact
    Birthday { name: String },

    /// Show all contacts
    Show {
        /// Records per page
        #[arg(short = 'n', long)]
        page_size: Option<String>,
    },

    /// Show the owner of the address book, or rename it
    Owner { new_owner: Option<String> },

    /// Start a new empty address book
    NewProfile { owner: Option<String> },

    /// Store the address book under its owner's name
    Store,

    /// Load the address book stored for a user
    Load { owner: String },

    /// List stored address books
    Books,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FindBy {
    Name,
    Phone,
    Email,
    Birthday,
    /// Birthday in exactly N days
    Days,
    Address,
    /// Substring in the fields picked by --fields
    In,
}

/// Where to insert a new phone or e-mail. Defaults to the end.
#[derive(Args, Debug, Clone, Default)]
pub struct AddPosition {
    /// 1-based position
    #[arg(long)]
    pub idx: Option<usize>,
    /// Insert at the beginning
    #[arg(long)]
    pub first: bool,
}

/// Which existing phone or e-mail to act on.
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// 1-based position
    #[arg(long)]
    pub idx: Option<usize>,
    /// The first entry
    #[arg(long)]
    pub first: bool,
    /// The last entry
    #[arg(long)]
    pub last: bool,
}

#[derive(Subcommand, Debug)]
pub enum EditOp {
    /// Rename the contact
    Name { new_name: String },

    /// Add a phone number
    AddPhone {
        value: String,
        #[command(flatten)]
        at: AddPosition,
    },

    /// Add an e-mail
    AddEmail {
        value: String,
        #[command(flatten)]
        at: AddPosition,
    },

    /// Remove a phone number, by value or position
    RemovePhone {
        value: Option<String>,
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Remove an e-mail, by value or position
    RemoveEmail {
        value: Option<String>,
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Replace a phone number: `edit-phone [OLD] NEW`, or NEW with a position
    EditPhone {
        #[arg(num_args = 1..=2, required = true)]
        values: Vec<String>,
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Replace an e-mail: `edit-email [OLD] NEW`, or NEW with a position
    EditEmail {
        #[arg(num_args = 1..=2, required = true)]
        values: Vec<String>,
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Set the birthday (day/month), replacing any old one
    Birthday { birthday: String },

    /// Remove the birthday
    RemoveBirthday,

    /// Set the address, replacing any old one
    Address {
        #[arg(required = true, num_args = 1..)]
        address: Vec<String>,
    },

    /// Remove the address
    RemoveAddress,
}
