//! Terminal front end: each subcommand is one UI flow driven through the
//! [`Store`].

use std::io::{self, Write};

use clap::{Parser, Subcommand};
use roster_shared::constants::{MSG_USER_CREATED, MSG_USER_DELETED, MSG_USER_UPDATED};
use roster_shared::types::{UserDraft, UserId};

use crate::api::UsersApi;
use crate::store::Store;
use crate::view::{render_user, render_users_table, Notice};

pub const MSG_FIELDS_REQUIRED: &str = "All fields are required";

#[derive(Debug, Parser)]
#[command(name = "roster", version, about = "Manage Roster users from the terminal")]
pub struct Cli {
    /// Base URL of the Roster server (overrides ROSTER_API_URL).
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show every user.
    List,

    /// Show one user.
    Show { id: UserId },

    /// Create a user.
    Create {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },

    /// Change a user's name and/or email; omitted fields keep their value.
    Update {
        id: UserId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },

    /// Delete a user.
    Delete {
        id: UserId,
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    Cancelled,
    Failed,
}

/// Drives one command against a store, writing to `out`.
pub struct Console<'a, A, W> {
    store: &'a Store<A>,
    out: W,
}

impl<'a, A: UsersApi, W: Write> Console<'a, A, W> {
    pub fn new(store: &'a Store<A>, out: W) -> Self {
        Self { store, out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// `confirm` is asked before anything destructive and returns whether to
    /// go ahead.
    pub async fn execute(
        &mut self,
        command: Command,
        confirm: impl FnOnce(&str) -> bool,
    ) -> io::Result<Outcome> {
        if let Command::Show { id } = command {
            return self.show(id).await;
        }

        // Every other flow starts from the table, as the page does on load.
        if self.store.fetch_users().await.is_err() {
            return self.report_error();
        }

        match command {
            Command::List => {
                self.render_table()?;
                Ok(Outcome::Done)
            }
            Command::Show { .. } => Ok(Outcome::Done),
            Command::Create { name, email } => self.create(name, email).await,
            Command::Update { id, name, email } => self.update(id, name, email).await,
            Command::Delete { id, yes } => self.delete(id, yes, confirm).await,
        }
    }

    async fn show(&mut self, id: UserId) -> io::Result<Outcome> {
        if self.store.fetch_user_by_id(id).await.is_err() {
            return self.report_error();
        }
        if let Some(user) = self.store.snapshot().selected_user {
            write!(self.out, "{}", render_user(&user))?;
        }
        Ok(Outcome::Done)
    }

    async fn create(
        &mut self,
        name: Option<String>,
        email: Option<String>,
    ) -> io::Result<Outcome> {
        let draft = UserDraft::new(name.unwrap_or_default(), email.unwrap_or_default());
        if !draft.is_complete() {
            self.notify(Notice::Error(MSG_FIELDS_REQUIRED.into()))?;
            return Ok(Outcome::Failed);
        }

        if self.store.create_user(&draft).await.is_err() {
            return self.report_error();
        }
        self.notify(Notice::Success(MSG_USER_CREATED.into()))?;

        if self.store.fetch_users().await.is_err() {
            return self.report_error();
        }
        self.render_table()?;
        Ok(Outcome::Done)
    }

    async fn update(
        &mut self,
        id: UserId,
        name: Option<String>,
        email: Option<String>,
    ) -> io::Result<Outcome> {
        // A stale error must not be shown again when the edit form opens.
        self.store.clear_error();

        if self.store.fetch_user_by_id(id).await.is_err() {
            return self.report_error();
        }
        let Some(current) = self.store.snapshot().selected_user else {
            return Ok(Outcome::Failed);
        };

        let draft = UserDraft::new(
            name.unwrap_or(current.name),
            email.unwrap_or(current.email),
        );
        if !draft.is_complete() {
            self.notify(Notice::Error(MSG_FIELDS_REQUIRED.into()))?;
            return Ok(Outcome::Failed);
        }

        if self.store.update_user(id, &draft).await.is_err() {
            return self.report_error();
        }
        self.notify(Notice::Success(MSG_USER_UPDATED.into()))?;
        self.store.clear_error();
        self.render_table()?;
        Ok(Outcome::Done)
    }

    async fn delete(
        &mut self,
        id: UserId,
        yes: bool,
        confirm: impl FnOnce(&str) -> bool,
    ) -> io::Result<Outcome> {
        let label = match self.store.snapshot().find(id) {
            Some(user) => user.name.clone(),
            None => format!("#{id}"),
        };
        let prompt =
            format!("Are you sure you want to delete user {label}? This cannot be undone.");

        if !yes && !confirm(&prompt) {
            writeln!(self.out, "Cancelled")?;
            return Ok(Outcome::Cancelled);
        }

        if self.store.delete_user(id).await.is_err() {
            return self.report_error();
        }
        self.notify(Notice::Success(MSG_USER_DELETED.into()))?;

        if self.store.fetch_users().await.is_err() {
            return self.report_error();
        }
        self.render_table()?;
        Ok(Outcome::Done)
    }

    fn render_table(&mut self) -> io::Result<()> {
        let state = self.store.snapshot();
        write!(self.out, "{}", render_users_table(&state.users))
    }

    fn notify(&mut self, notice: Notice) -> io::Result<()> {
        writeln!(self.out, "{notice}")
    }

    /// Show the stored error once, then clear it.
    fn report_error(&mut self) -> io::Result<Outcome> {
        if let Some(error) = self.store.snapshot().error {
            self.notify(Notice::Error(error))?;
        }
        self.store.clear_error();
        Ok(Outcome::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeApi;

    async fn run(store: &Store<FakeApi>, command: Command, answer: bool) -> (Outcome, String) {
        let mut console = Console::new(store, Vec::new());
        let outcome = console.execute(command, |_| answer).await.unwrap();
        (outcome, String::from_utf8(console.into_inner()).unwrap())
    }

    #[tokio::test]
    async fn list_renders_table() {
        let store = Store::new(FakeApi::with_users(&["Ana"]));
        let (outcome, out) = run(&store, Command::List, true).await;
        assert_eq!(outcome, Outcome::Done);
        assert!(out.contains("ana@x.com"));
    }

    #[tokio::test]
    async fn list_on_empty_server() {
        let store = Store::new(FakeApi::default());
        let (_, out) = run(&store, Command::List, true).await;
        assert!(out.contains("No users registered"));
    }

    #[tokio::test]
    async fn create_requires_both_fields() {
        let store = Store::new(FakeApi::default());
        let (outcome, out) = run(
            &store,
            Command::Create {
                name: Some("Ana".into()),
                email: None,
            },
            true,
        )
        .await;
        assert_eq!(outcome, Outcome::Failed);
        assert!(out.contains(MSG_FIELDS_REQUIRED));
        assert!(store.api().users().is_empty());
    }

    #[tokio::test]
    async fn create_then_refetch() {
        let store = Store::new(FakeApi::default());
        let (outcome, out) = run(
            &store,
            Command::Create {
                name: Some("Ana".into()),
                email: Some("ana@x.com".into()),
            },
            true,
        )
        .await;
        assert_eq!(outcome, Outcome::Done);
        assert!(out.contains(MSG_USER_CREATED));
        assert!(out.contains("ana@x.com"));
    }

    #[tokio::test]
    async fn duplicate_create_reports_server_message_and_clears_it() {
        let store = Store::new(FakeApi::with_users(&["Ana"]));
        let (outcome, out) = run(
            &store,
            Command::Create {
                name: Some("Ana".into()),
                email: Some("new@x.com".into()),
            },
            true,
        )
        .await;
        assert_eq!(outcome, Outcome::Failed);
        assert!(out.contains("[error] A user with that name already exists."));
        assert_eq!(store.snapshot().error, None);
    }

    #[tokio::test]
    async fn update_prefills_missing_fields() {
        let store = Store::new(FakeApi::with_users(&["Ana"]));
        let (outcome, out) = run(
            &store,
            Command::Update {
                id: 1,
                name: Some("Anna".into()),
                email: None,
            },
            true,
        )
        .await;
        assert_eq!(outcome, Outcome::Done);
        assert!(out.contains(MSG_USER_UPDATED));

        let users = store.api().users();
        assert_eq!(users[0].name, "Anna");
        assert_eq!(users[0].email, "ana@x.com");
        assert_eq!(store.snapshot().users, users);
    }

    #[tokio::test]
    async fn update_missing_user_fails() {
        let store = Store::new(FakeApi::default());
        let (outcome, out) = run(
            &store,
            Command::Update {
                id: 3,
                name: Some("X".into()),
                email: Some("x@x.com".into()),
            },
            true,
        )
        .await;
        assert_eq!(outcome, Outcome::Failed);
        assert!(out.contains("No user found with ID 3."));
    }

    #[tokio::test]
    async fn delete_asks_with_user_name() {
        let store = Store::new(FakeApi::with_users(&["Ana"]));
        let mut console = Console::new(&store, Vec::new());
        let mut asked = String::new();

        let outcome = console
            .execute(Command::Delete { id: 1, yes: false }, |prompt| {
                asked = prompt.to_string();
                false
            })
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Cancelled);
        assert!(asked.contains("delete user Ana?"));
        assert_eq!(store.api().users().len(), 1);
    }

    #[tokio::test]
    async fn delete_with_yes_skips_prompt() {
        let store = Store::new(FakeApi::with_users(&["Ana", "Bo"]));
        let (outcome, out) = run(&store, Command::Delete { id: 1, yes: true }, false).await;
        assert_eq!(outcome, Outcome::Done);
        assert!(out.contains(MSG_USER_DELETED));
        assert_eq!(store.snapshot().users.len(), 1);
    }

    #[tokio::test]
    async fn unreachable_data_fails_before_any_write() {
        let api = FakeApi::with_users(&["Ana"]);
        api.go_offline();
        let store = Store::new(api);

        let (outcome, out) = run(&store, Command::Delete { id: 1, yes: true }, true).await;
        assert_eq!(outcome, Outcome::Failed);
        assert!(out.contains("[error] Failed to retrieve users."));
        assert_eq!(store.api().users().len(), 1);
    }

    #[test]
    fn parses_subcommands() {
        let cli = Cli::try_parse_from([
            "roster",
            "--api-url",
            "http://h:1",
            "update",
            "4",
            "--email",
            "e@x.com",
        ])
        .unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://h:1"));
        assert!(matches!(
            cli.command,
            Some(Command::Update { id: 4, name: None, email: Some(_) })
        ));

        let cli = Cli::try_parse_from(["roster"]).unwrap();
        assert!(cli.command.is_none());
    }
}
