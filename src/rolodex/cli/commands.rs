//! # CLI Layer
//!
//! This module is **one possible UI client** for rolodex, not the application
//! itself. It is the only place that knows about the terminal, exit codes and
//! argument parsing.
//!
//! Every run is one command:
//!
//! 1. load settings and set up logging,
//! 2. open a stored book (or an empty one): the `--owner` one, else the one
//!    last switched to with `load`, `new-profile` or `owner`, else the
//!    configured owner's,
//! 3. dispatch the command to [`RolodexApi`] and print its [`CmdResult`],
//! 4. store the book again if the command changed it.

use super::print::{print_books, print_messages, print_pages};
use super::setup::{AddPosition, Cli, Commands, EditOp, FindBy, TargetArgs};
use clap::Parser;
use colored::Colorize;
use rolodex::api::RolodexApi;
use rolodex::change::{AddValue, Change, ChangeKind, EditValue, Target};
use rolodex::config::RolodexConfig;
use rolodex::error::{Result, RolodexError};
use rolodex::paging::parse_page_size;
use rolodex::search::{parse_days, Query, SearchFields};
use rolodex::store::fs::FsBackend;
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

struct AppContext {
    api: RolodexApi<FsBackend>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut ctx = init_context(&cli)?;

    let result = match cli.command {
        Some(Commands::Add {
            name,
            phone,
            email,
            birthday,
            address,
        }) => {
            let address = join_words(&address);
            ctx.api.add_contact(
                &name,
                phone.as_deref(),
                email.as_deref(),
                birthday.as_deref(),
                address.as_deref(),
            )?
        }
        Some(Commands::Edit { name, op }) => ctx.api.edit(build_change(name, op)?)?,
        Some(Commands::Find {
            by,
            value,
            fields,
            page_size,
        }) => {
            let query = build_query(by, &value, &fields)?;
            let page_size = page_size_or_warn(page_size.as_deref());
            ctx.api.find(&query, page_size)?
        }
        Some(Commands::Delete { name }) => ctx.api.delete(&name)?,
        Some(Commands::Phone { name }) => ctx.api.phones(&name)?,
        Some(Commands::Email { name }) => ctx.api.emails(&name)?,
        Some(Commands::Birthday { name }) => ctx.api.birthday(&name)?,
        Some(Commands::Show { page_size }) => {
            let page_size = page_size_or_warn(page_size.as_deref());
            ctx.api.show_all(page_size)?
        }
        Some(Commands::Owner { new_owner: None }) => ctx.api.owner()?,
        Some(Commands::Owner {
            new_owner: Some(owner),
        }) => ctx.api.set_owner(&owner)?,
        Some(Commands::NewProfile { owner }) => ctx.api.new_profile(owner.as_deref())?,
        Some(Commands::Store) => ctx.api.store()?,
        Some(Commands::Load { owner }) => ctx.api.load(&owner)?,
        Some(Commands::Books) => ctx.api.books()?,
        None => ctx.api.show_all(None)?,
    };

    print_pages(&result.pages);
    print_books(&result.books);
    print_messages(&result.messages);

    if result.modified {
        ctx.api.store()?;
        debug!(owner = %ctx.api.book().owner(), "changes stored");
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.into()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let config = RolodexConfig::load(cli.config.as_deref())?;
    let backend = FsBackend::new(config.storage_dir()?);
    debug!(root = %backend.root().display(), "storage");

    let mut api = RolodexApi::new(backend, &config.owner)?;
    api.set_page_size(config.page_size)?;
    api.open(cli.owner.as_deref())?;

    Ok(AppContext { api })
}

/// Invalid page sizes are reported and ignored.
fn page_size_or_warn(raw: Option<&str>) -> Option<usize> {
    let raw = raw?;
    match parse_page_size(raw) {
        Ok(n) => Some(n),
        Err(e) => {
            eprintln!("{}", format!("WARNING: {} (ignored)", e).yellow());
            None
        }
    }
}

fn join_words(words: &[String]) -> Option<String> {
    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

fn build_query(by: FindBy, value: &[String], fields: &str) -> Result<Query> {
    let text = value.join(" ");
    Ok(match by {
        FindBy::Name => Query::Name(text),
        FindBy::Phone => Query::Phone(text),
        FindBy::Email => Query::Email(text),
        FindBy::Birthday => Query::Birthday(text),
        FindBy::Days => Query::DaysTillBirthday(parse_days(&text)?),
        FindBy::Address => Query::Address(text),
        FindBy::In => Query::Substring {
            text,
            fields: SearchFields::parse(fields)?,
        },
    })
}

fn add_value(value: String, at: AddPosition) -> AddValue {
    AddValue {
        new_value: value,
        idx: at.idx,
        add_to_beginning: at.first,
    }
}

fn target(value: Option<String>, args: TargetArgs) -> Target {
    Target {
        cur_value: value,
        idx: args.idx,
        first: args.first,
        last: args.last,
    }
}

/// `[OLD] NEW`: with two values the first picks the entry by value.
fn edit_value(mut values: Vec<String>, args: TargetArgs) -> Result<EditValue> {
    let new_value = values
        .pop()
        .ok_or_else(|| RolodexError::validation("Please specify the new value."))?;
    Ok(EditValue::new(new_value, target(values.pop(), args)))
}

fn build_change(name: String, op: EditOp) -> Result<Change> {
    let kind = match op {
        EditOp::Name { new_name } => ChangeKind::EditName { new_name },
        EditOp::AddPhone { value, at } => ChangeKind::AddPhone(add_value(value, at)),
        EditOp::AddEmail { value, at } => ChangeKind::AddEmail(add_value(value, at)),
        EditOp::RemovePhone { value, target: t } => ChangeKind::RemovePhone(target(value, t)),
        EditOp::RemoveEmail { value, target: t } => ChangeKind::RemoveEmail(target(value, t)),
        EditOp::EditPhone { values, target: t } => ChangeKind::EditPhone(edit_value(values, t)?),
        EditOp::EditEmail { values, target: t } => ChangeKind::EditEmail(edit_value(values, t)?),
        EditOp::Birthday { birthday } => ChangeKind::EditBirthday {
            new_birthday: birthday,
        },
        EditOp::RemoveBirthday => ChangeKind::RemoveBirthday,
        EditOp::Address { address } => ChangeKind::EditAddress {
            new_address: address.join(" "),
        },
        EditOp::RemoveAddress => ChangeKind::RemoveAddress,
    };
    Ok(Change::new(name, kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_edit_value_with_old_and_new() {
        let edit = edit_value(words(&["old", "new"]), TargetArgs::default()).unwrap();
        assert_eq!(edit.new_value, "new");
        assert_eq!(edit.target.cur_value.as_deref(), Some("old"));
    }

    #[test]
    fn test_edit_value_with_position() {
        let args = TargetArgs {
            idx: Some(2),
            ..Default::default()
        };
        let edit = edit_value(words(&["new"]), args).unwrap();
        assert_eq!(edit.new_value, "new");
        assert_eq!(edit.target, Target::at(2));
    }

    #[test]
    fn test_build_change_joins_address() {
        let change = build_change(
            "tu".into(),
            EditOp::Address {
                address: words(&["Baker", "St"]),
            },
        )
        .unwrap();
        assert_eq!(
            change.kind,
            ChangeKind::EditAddress {
                new_address: "Baker St".into()
            }
        );
    }

    #[test]
    fn test_build_query() {
        assert_eq!(
            build_query(FindBy::Days, &words(&["7"]), "np").unwrap(),
            Query::DaysTillBirthday(7)
        );
        assert!(build_query(FindBy::Days, &words(&["soon"]), "np").is_err());
        assert!(build_query(FindBy::In, &words(&["tu"]), "xyz").is_err());
        assert_eq!(
            build_query(FindBy::Address, &words(&["Main", "St", "1"]), "np").unwrap(),
            Query::Address("Main St 1".into())
        );
    }

    #[test]
    fn test_page_size_or_warn() {
        assert_eq!(page_size_or_warn(None), None);
        assert_eq!(page_size_or_warn(Some("3")), Some(3));
        assert_eq!(page_size_or_warn(Some("m3")), None);
    }
}
