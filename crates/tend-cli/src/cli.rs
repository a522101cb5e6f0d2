//! Routine commands of the terminal front-end.
//!
//! Argument structures convert into core parameter types so clap attributes
//! stay out of `tend_core`:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → RoutineCatalog → routine API
//! ```

use std::str::FromStr;

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use tend_core::{
    params::generate_id, Category, CreateResult, DeleteResult, MusicPlatform, NewStep, Notifier,
    OperationStatus, RoutineApi, RoutineCatalog, RoutineSummaries, Step, TendError, UpdateResult,
};

use crate::{renderer::TerminalRenderer, session};

/// A step given on the command line as `TITLE:MINUTES[:URL[:PLATFORM]]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepSpec {
    pub title: String,
    pub duration: u32,
    pub music_url: Option<String>,
    pub music_platform: Option<MusicPlatform>,
}

impl FromStr for StepSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (title, rest) = s
            .split_once(':')
            .ok_or_else(|| format!("Invalid step '{s}': expected TITLE:MINUTES[:URL[:PLATFORM]]"))?;
        let (minutes, music) = match rest.split_once(':') {
            Some((minutes, music)) => (minutes, Some(music)),
            None => (rest, None),
        };

        let title = title.trim();
        if title.is_empty() {
            return Err(format!("Invalid step '{s}': title is empty"));
        }
        let duration = minutes
            .trim()
            .parse::<u32>()
            .map_err(|_| format!("Invalid step '{s}': '{minutes}' is not a number of minutes"))?;

        // The URL itself contains colons, so the platform is only split off
        // when the last segment names one.
        let (music_url, music_platform) = match music {
            None => (None, None),
            Some(music) => match music.rsplit_once(':') {
                Some((url, platform)) => match platform.parse::<MusicPlatform>() {
                    Ok(platform) => (Some(url.to_string()), Some(platform)),
                    Err(_) => (Some(music.to_string()), None),
                },
                None => (Some(music.to_string()), None),
            },
        };

        Ok(StepSpec {
            title: title.to_string(),
            duration,
            music_url,
            music_platform,
        })
    }
}

impl From<StepSpec> for NewStep {
    fn from(val: StepSpec) -> Self {
        NewStep {
            id: None,
            title: val.title,
            duration: val.duration,
            completed: false,
            music_url: val.music_url,
            music_platform: val.music_platform,
        }
    }
}

/// Create a new custom routine
#[derive(Args)]
pub struct CreateRoutineArgs {
    /// Title of the routine
    pub title: String,
    /// Optional description of the routine
    #[arg(short, long)]
    pub description: Option<String>,
    /// Step as TITLE:MINUTES[:URL[:PLATFORM]], repeatable and kept in order
    #[arg(short, long = "step", value_name = "STEP")]
    pub steps: Vec<StepSpec>,
}

/// Show details of a routine
#[derive(Args)]
pub struct ShowRoutineArgs {
    #[arg(help = "Identifier of the routine to show")]
    pub id: String,
}

/// Edit a routine
///
/// The routine is replaced as a whole on the server. Steps given with
/// `--step` replace the existing step list.
#[derive(Args)]
pub struct EditRoutineArgs {
    #[arg(help = "Identifier of the routine to edit")]
    pub id: String,
    #[arg(short, long, help = "New title for the routine")]
    pub title: Option<String>,
    #[arg(short, long, help = "New description for the routine")]
    pub description: Option<String>,
    #[arg(short, long, help = "New category (morning, evening, workout, meditation, custom)")]
    pub category: Option<Category>,
    #[arg(
        short,
        long = "step",
        value_name = "STEP",
        help = "Replacement step as TITLE:MINUTES[:URL[:PLATFORM]], repeatable"
    )]
    pub steps: Vec<StepSpec>,
    #[arg(long, help = "Mark every step as not completed")]
    pub reset: bool,
}

/// Delete a routine permanently
#[derive(Args)]
pub struct DeleteRoutineArgs {
    #[arg(help = "Identifier of the routine to delete")]
    pub id: String,
}

/// Set the completion flag of a step on the server
#[derive(Args)]
pub struct CompleteStepArgs {
    pub routine_id: String,
    pub step_id: String,
    #[arg(long, help = "Mark the step as not completed instead")]
    pub undo: bool,
}

/// Open the playlist of a step
#[derive(Args)]
pub struct OpenMusicArgs {
    pub routine_id: String,
    pub step_id: String,
}

/// Walk through a routine
#[derive(Args)]
pub struct RunArgs {
    #[arg(help = "Identifier of the routine to run")]
    pub id: String,
}

#[derive(Subcommand)]
pub enum RoutineCommands {
    /// List all routines
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show details of a routine
    #[command(alias = "s")]
    Show(ShowRoutineArgs),
    /// Create a new routine
    #[command(alias = "c")]
    Create(CreateRoutineArgs),
    /// Edit a routine
    #[command(alias = "e")]
    Edit(EditRoutineArgs),
    /// Delete a routine permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteRoutineArgs),
    /// Set the completion flag of a step
    Complete(CompleteStepArgs),
    /// Open the playlist of a step in its music service
    #[command(alias = "o")]
    Open(OpenMusicArgs),
}

/// Command handler on top of the routine catalog.
pub struct Cli<A, N> {
    catalog: RoutineCatalog<A, N>,
    renderer: TerminalRenderer,
    persist_completion: bool,
}

impl<A: RoutineApi, N: Notifier> Cli<A, N> {
    pub fn new(catalog: RoutineCatalog<A, N>, renderer: TerminalRenderer) -> Self {
        Self {
            catalog,
            renderer,
            persist_completion: false,
        }
    }

    pub fn with_persist_completion(mut self, persist: bool) -> Self {
        self.persist_completion = persist;
        self
    }

    pub async fn handle_routine_command(mut self, command: RoutineCommands) -> Result<()> {
        match command {
            RoutineCommands::List => self.list_routines().await,
            RoutineCommands::Show(args) => self.show_routine(&args.id).await,
            RoutineCommands::Create(args) => self.create_routine(args).await,
            RoutineCommands::Edit(args) => self.edit_routine(args).await,
            RoutineCommands::Delete(args) => self.delete_routine(&args.id).await,
            RoutineCommands::Complete(args) => self.complete_step(args).await,
            RoutineCommands::Open(args) => self.open_music(args).await,
        }
    }

    pub async fn list_routines(&mut self) -> Result<()> {
        self.refresh().await?;
        let summaries = RoutineSummaries(self.catalog.summaries());
        self.renderer.render(&summaries.to_string())
    }

    async fn show_routine(&mut self, id: &str) -> Result<()> {
        self.refresh().await?;
        let routine = self.catalog.select(id)?;
        self.renderer.render(&routine.to_string())
    }

    async fn create_routine(&mut self, args: CreateRoutineArgs) -> Result<()> {
        let steps = args.steps.into_iter().map(NewStep::from).collect();
        let routine = self
            .catalog
            .add(&args.title, args.description, steps)
            .await
            .context("Failed to create routine")?;

        let result = CreateResult::new(routine.clone());
        self.renderer.render(&result.to_string())
    }

    async fn edit_routine(&mut self, args: EditRoutineArgs) -> Result<()> {
        self.refresh().await?;
        let mut routine = self.catalog.select(&args.id)?.clone();
        let mut changes = Vec::new();

        if let Some(title) = args.title {
            routine.title = title;
            changes.push("title".to_string());
        }
        if let Some(description) = args.description {
            routine.description = Some(description).filter(|d| !d.trim().is_empty());
            changes.push("description".to_string());
        }
        if let Some(category) = args.category {
            routine.category = category;
            changes.push("category".to_string());
        }
        if !args.steps.is_empty() {
            routine.steps = args
                .steps
                .into_iter()
                .map(|spec| Step {
                    id: generate_id(),
                    title: spec.title,
                    duration: spec.duration,
                    completed: false,
                    music_url: spec.music_url,
                    music_platform: spec.music_platform,
                })
                .collect();
            changes.push("steps".to_string());
        }
        if args.reset {
            for step in &mut routine.steps {
                step.completed = false;
            }
            changes.push("completion reset".to_string());
        }

        if changes.is_empty() {
            bail!("Nothing to change. Pass --title, --description, --category, --step or --reset");
        }

        let routine = self
            .catalog
            .edit(&routine)
            .await
            .context("Failed to update routine")?;
        let result = UpdateResult::with_changes(routine.clone(), changes);
        self.renderer.render(&result.to_string())
    }

    async fn delete_routine(&mut self, id: &str) -> Result<()> {
        self.refresh().await?;
        let routine = self.catalog.select(id)?.clone();
        self.catalog
            .remove(id)
            .await
            .context("Failed to delete routine")?;

        let result = DeleteResult::new(routine);
        self.renderer.render(&result.to_string())
    }

    async fn complete_step(&mut self, args: CompleteStepArgs) -> Result<()> {
        let routine = self
            .catalog
            .persist_step_completion(&args.routine_id, &args.step_id, !args.undo)
            .await
            .context("Failed to update step")?;

        let change = if args.undo {
            format!("step {} marked todo", args.step_id)
        } else {
            format!("step {} marked done", args.step_id)
        };
        let result = UpdateResult::with_changes(routine.clone(), vec![change]);
        self.renderer.render(&result.to_string())
    }

    async fn open_music(&mut self, args: OpenMusicArgs) -> Result<()> {
        self.refresh().await?;
        let routine = self.catalog.select(&args.routine_id)?;
        let step = routine
            .step(&args.step_id)
            .ok_or_else(|| TendError::StepNotFound {
                routine_id: args.routine_id.clone(),
                step_id: args.step_id.clone(),
            })?;

        let status = open_playlist(step)?;
        self.renderer.render(&status.to_string())
    }

    pub async fn run_routine(mut self, args: RunArgs) -> Result<()> {
        self.refresh().await?;
        session::run(
            &mut self.catalog,
            &self.renderer,
            &args.id,
            self.persist_completion,
        )
        .await
    }

    async fn refresh(&mut self) -> Result<()> {
        self.catalog
            .refresh()
            .await
            .context("Failed to load routines")
    }
}

/// Opens the playlist of `step` with the platform's URL handler.
pub fn open_playlist(step: &Step) -> Result<OperationStatus> {
    let Some((platform, url)) = step.playlist() else {
        return Ok(OperationStatus::failure(format!(
            "Step '{}' has no playlist",
            step.title
        )));
    };

    log::debug!("Opening {url}");
    open::that(url).with_context(|| format!("Failed to open {url}"))?;
    Ok(OperationStatus::success(format!(
        "Opened playlist for '{}' in {platform}",
        step.title
    )))
}
