//! Taskboard CLI - command line front end for the task store.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use taskboard_client::{FetchOutcome, HttpTaskApi, Session, TaskStore};
use taskboard_core::{
    FilterPatch, NewTask, Task, TaskId, TaskPatch, TaskPriority, TaskStatus, UserRef,
};

/// Taskboard CLI - browse and mutate tasks from the terminal
#[derive(Parser)]
#[command(name = "taskboard")]
#[command(about = "CLI for the Taskboard task API", long_about = None)]
struct Cli {
    /// Task API base URL
    #[arg(long, env = "TASKBOARD_URL", default_value = "http://localhost:5000")]
    base_url: String,

    /// Bearer token of the logged-in user
    #[arg(long, env = "TASKBOARD_TOKEN")]
    token: Option<String>,

    /// Print raw JSON instead of formatted output
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List tasks, optionally filtered
    List {
        /// Page number (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Filter by status (pending, in-progress, completed)
        #[arg(long)]
        status: Option<TaskStatus>,

        /// Filter by priority (low, medium, high, urgent)
        #[arg(long)]
        priority: Option<TaskPriority>,

        /// Free-text search over title/description
        #[arg(long)]
        search: Option<String>,

        /// Filter by assignee user id
        #[arg(long)]
        assigned_to: Option<String>,

        /// Filter by creator user id
        #[arg(long)]
        created_by: Option<String>,
    },

    /// Show a single task
    Get {
        /// Task ID
        id: String,
    },

    /// Create a new task
    Create {
        #[arg(short, long)]
        title: String,

        #[arg(short, long, default_value = "")]
        description: String,

        /// Due timestamp, RFC 3339 (e.g. 2025-07-01T12:00:00Z)
        #[arg(long)]
        due: DateTime<Utc>,

        #[arg(long, default_value = "medium")]
        priority: TaskPriority,

        /// Tags, repeatable
        #[arg(long)]
        tag: Vec<String>,

        /// Assignee user id
        #[arg(long)]
        assigned_to: Option<String>,
    },

    /// Update fields of a task
    Update {
        /// Task ID
        id: String,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        /// Due timestamp, RFC 3339
        #[arg(long)]
        due: Option<DateTime<Utc>>,

        #[arg(long)]
        priority: Option<TaskPriority>,

        #[arg(long)]
        status: Option<TaskStatus>,
    },

    /// Change a task's status
    Status {
        /// Task ID
        id: String,

        /// New status (pending, in-progress, completed)
        status: TaskStatus,
    },

    /// Change a task's priority
    Priority {
        /// Task ID
        id: String,

        /// New priority (low, medium, high, urgent)
        priority: TaskPriority,
    },

    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },

    /// List users a task can be assigned to
    Users,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let session = match &cli.token {
        Some(token) => Session::authenticated(token.clone()),
        None => Session::anonymous(),
    };
    let api = Arc::new(HttpTaskApi::new(&cli.base_url, session.clone()));
    let store = TaskStore::new(api, session);
    let json = cli.json;

    match cli.command {
        Commands::List {
            page,
            status,
            priority,
            search,
            assigned_to,
            created_by,
        } => {
            let mut patch = FilterPatch::default();
            if let Some(status) = status {
                patch = patch.status(status.as_str());
            }
            if let Some(priority) = priority {
                patch = patch.priority(priority.as_str());
            }
            if let Some(search) = search {
                patch = patch.search(search);
            }
            if let Some(assigned_to) = assigned_to {
                patch = patch.assigned_to(assigned_to);
            }
            if let Some(created_by) = created_by {
                patch = patch.created_by(created_by);
            }
            list_tasks(&store, page, patch, json).await?;
        }
        Commands::Get { id } => {
            let task = store.get_task_by_id(&TaskId::new(id)).await?;
            print_task(&task, json)?;
        }
        Commands::Create {
            title,
            description,
            due,
            priority,
            tag,
            assigned_to,
        } => {
            let task = store
                .create_task(&NewTask {
                    title,
                    description,
                    due_date: due,
                    priority,
                    tags: tag,
                    assigned_to: assigned_to.map(Into::into),
                })
                .await?;
            println!("Task created:");
            print_task(&task, json)?;
        }
        Commands::Update {
            id,
            title,
            description,
            due,
            priority,
            status,
        } => {
            let patch = TaskPatch {
                title,
                description,
                due_date: due,
                priority,
                status,
                ..Default::default()
            };
            let task = store.update_task(&TaskId::new(id), &patch).await?;
            println!("Task updated:");
            print_task(&task, json)?;
        }
        Commands::Status { id, status } => {
            let task = store.update_task_status(&TaskId::new(id), status).await?;
            println!("Task updated:");
            print_task(&task, json)?;
        }
        Commands::Priority { id, priority } => {
            let task = store
                .update_task_priority(&TaskId::new(id), priority)
                .await?;
            println!("Task updated:");
            print_task(&task, json)?;
        }
        Commands::Delete { id } => {
            store.delete_task(&TaskId::new(id)).await?;
            println!("Task deleted");
        }
        Commands::Users => {
            let users = store.list_users().await?;
            print_users(&users, json)?;
        }
    }

    Ok(())
}

async fn list_tasks(
    store: &TaskStore,
    page: u32,
    patch: FilterPatch,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut outcome = store.set_filters(patch).await;
    if page != 1 && outcome != FetchOutcome::Skipped {
        outcome = store.list_tasks(page).await;
    }
    if outcome == FetchOutcome::Skipped {
        return Err("not logged in: pass --token or set TASKBOARD_TOKEN".into());
    }

    let snapshot = store.snapshot();
    if let Some(error) = snapshot.error {
        return Err(error.into());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot.tasks)?);
        return Ok(());
    }

    for task in &snapshot.tasks {
        print_task_line(task);
    }
    let p = &snapshot.pagination;
    println!(
        "Page {}/{} ({} tasks total{}{})",
        p.current_page,
        p.total_pages,
        p.total_tasks,
        if p.has_next_page { ", more available" } else { "" },
        if snapshot.counts_dirty { ", counts stale" } else { "" },
    );
    Ok(())
}

fn print_task_line(task: &Task) {
    println!(
        "{}  [{}] [{}]  {}  (due {})",
        task.id,
        task.status,
        task.priority,
        task.title,
        task.due_date.format("%Y-%m-%d"),
    );
}

fn print_task(task: &Task, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(task)?);
        return Ok(());
    }
    println!("ID:          {}", task.id);
    println!("Title:       {}", task.title);
    println!("Description: {}", task.description);
    println!("Status:      {}", task.status);
    println!("Priority:    {}", task.priority);
    println!("Due:         {}", task.due_date.to_rfc3339());
    println!("Tags:        {}", task.tags.join(", "));
    println!(
        "Creator:     {} <{}>",
        task.created_by.name, task.created_by.email
    );
    match &task.assigned_to {
        Some(assignee) => println!("Assignee:    {} <{}>", assignee.name, assignee.email),
        None => println!("Assignee:    -"),
    }
    println!("Created:     {}", task.created_at.to_rfc3339());
    println!("Updated:     {}", task.updated_at.to_rfc3339());
    Ok(())
}

fn print_users(users: &[UserRef], json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(users)?);
        return Ok(());
    }
    for user in users {
        println!("{}  {} <{}>", user.id, user.name, user.email);
    }
    Ok(())
}
