use std::io::Write;
use clap::Subcommand;
use pagegate::db::Db;
use pagegate::model::{AccessGrant, ConfigVariable, Model, NAME_MAX_EXCLUSIVE,
                      NAME_MIN_EXCLUSIVE};

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Page access grants.
    #[command(subcommand)]
    Grant(GrantCommand),
    /// Site configuration variables.
    #[command(subcommand)]
    Var(VarCommand),
}

#[derive(Debug, Subcommand)]
pub enum GrantCommand {
    /// Let a user see a page.
    Allow { user: String, page: String },
    /// Stop a user seeing a page.
    Revoke { user: String, page: String },
    /// Fail unless the user may see the page.
    Check { user: String, page: String },
    /// Print the pages a user may see.
    List { user: String },
}

#[derive(Debug, Subcommand)]
pub enum VarCommand {
    /// Create or replace a variable.  Without a value, the variable is null.
    Set { name: String, value: Option<String> },
    Get { name: String },
    Unset { name: String },
    List,
}

fn print(out: &mut impl Write, line: &str) -> Result<(), String> {
    writeln!(out, "{line}").map_err(|e| format!("error writing output: {e}"))
}

fn run_grant<D>(db: &D, cmd: &GrantCommand, out: &mut impl Write)
-> Result<(), String>
where
    D: Db + ?Sized,
{
    match cmd {
        GrantCommand::Allow { user, page } => {
            if AccessGrant::new(db, user, page).save() {
                Ok(())
            } else {
                Err(format!("could not allow {user} on {page}"))
            }
        }
        GrantCommand::Revoke { user, page } => {
            if AccessGrant::new(db, user, page).delete() {
                Ok(())
            } else {
                Err(format!("could not revoke {user} on {page}"))
            }
        }
        GrantCommand::Check { user, page } => {
            if AccessGrant::new(db, user, page).exists() {
                print(out, "allowed")
            } else {
                Err(format!("{user} may not see {page}"))
            }
        }
        GrantCommand::List { user } => {
            AccessGrant::list_by_user(db, user).into_iter()
                .filter_map(|grant| grant.page)
                .try_for_each(|page| print(out, &page))
        }
    }
}

fn run_var<D>(db: &D, cmd: &VarCommand, out: &mut impl Write)
-> Result<(), String>
where
    D: Db + ?Sized,
{
    match cmd {
        VarCommand::Set { name, value } => {
            let var = ConfigVariable::new(db, name, value.clone());
            if !var.validate() {
                Err(format!(
                    "invalid name ({name}): must be more than \
                     {NAME_MIN_EXCLUSIVE} and fewer than {NAME_MAX_EXCLUSIVE} \
                     characters"))
            } else if var.save() {
                Ok(())
            } else {
                Err(format!("could not save {name}"))
            }
        }
        VarCommand::Get { name } => {
            let var = ConfigVariable::find(db, name)
                .ok_or(format!("no such variable: {name}"))?;
            print(out, var.value.as_deref().unwrap_or(""))
        }
        VarCommand::Unset { name } => {
            if ConfigVariable::new(db, name, None).delete() {
                Ok(())
            } else {
                Err(format!("could not unset {name}"))
            }
        }
        VarCommand::List => {
            ConfigVariable::list(db).into_iter()
                .try_for_each(|var| print(out, &format!(
                    "{}={}",
                    var.name.as_deref().unwrap_or(""),
                    var.value.as_deref().unwrap_or(""))))
        }
    }
}

/// Run one command against `db`, writing any output to `out`.
pub fn run<D>(db: &D, cmd: &Command, out: &mut impl Write) -> Result<(), String>
where
    D: Db + ?Sized,
{
    log::debug!("running {cmd:?}");
    match cmd {
        Command::Grant(cmd) => run_grant(db, cmd, out),
        Command::Var(cmd) => run_var(db, cmd, out),
    }
}
