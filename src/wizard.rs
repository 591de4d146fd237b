//! Setup wizard state and navigation
//!
//! Three steps: Introduction, SelectFolder, Summary. The controller turns
//! intents from the rendering layer into engine calls, and turns relay events
//! from the engine into step changes. The rendering layer only ever hears
//! from the controller, through [`WizardView`].

use crate::installer::{InstallOutcome, InstallationEngine};
use crate::paths::{files, NormalizedPath};
use crate::relay::{Event, EventRelay, RelayError, Topic};
use std::cell::RefCell;
use std::rc::Rc;

/// Wizard step enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardStep {
    #[default]
    Introduction,
    SelectFolder,
    Summary,
}

impl WizardStep {
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::Introduction => 1,
            WizardStep::SelectFolder => 2,
            WizardStep::Summary => 3,
        }
    }

    pub fn total_steps() -> u8 {
        3
    }

    /// Label in the step list
    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Introduction => "Introduction",
            WizardStep::SelectFolder => "Shared Folder select",
            WizardStep::Summary => "Summary",
        }
    }

    /// Label of the forward button while on this step
    pub fn forward_label(&self) -> &'static str {
        match self {
            WizardStep::Introduction => "Continue",
            WizardStep::SelectFolder => "Install",
            WizardStep::Summary => "Close",
        }
    }
}

/// Result shown on the summary step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryStatus {
    Succeeded,
    Failed,
}

impl SummaryStatus {
    pub fn from_success(success: bool) -> Self {
        if success {
            SummaryStatus::Succeeded
        } else {
            SummaryStatus::Failed
        }
    }

    pub fn short_text(&self) -> &'static str {
        match self {
            SummaryStatus::Succeeded => "Install succeeded",
            SummaryStatus::Failed => "Install failed",
        }
    }

    pub fn long_text(&self) -> &'static str {
        match self {
            SummaryStatus::Succeeded => {
                "Awesome! Install succeeded.\n\nPlease restart Maya for changes to take effect. Enjoy."
            }
            SummaryStatus::Failed => {
                "Dammit, Install failed.\n\nSee Installation details for, well, details."
            }
        }
    }
}

/// Everything the rendering layer needs to draw a step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepContext {
    pub headline: &'static str,
    pub forward_label: &'static str,
    pub back_enabled: bool,
    pub forward_enabled: bool,
    pub shared_folder: Option<NormalizedPath>,
    pub reuse_notice: bool,
    pub summary: Option<SummaryStatus>,
}

/// Rendering layer consumed by the controller
pub trait WizardView {
    /// Show the page for `step` and hide the others
    fn enter_step(&mut self, step: WizardStep, context: &StepContext);

    /// Enable or disable the forward button
    fn set_can_advance(&mut self, enabled: bool);

    /// Show or hide the "existing sharedUserSetup.py will be used" note
    fn set_reuse_notice(&mut self, visible: bool);

    /// Blocking explanation of a correctable path problem
    fn show_path_error(&mut self, message: &str, trace: &str);

    /// Installation details expanded: short headline plus the raw log
    fn show_details(&mut self, status: SummaryStatus, log: &str);

    /// Installation details collapsed: long headline again
    fn hide_details(&mut self, status: SummaryStatus);

    fn open_url(&mut self, url: &str);

    /// End of the session
    fn close(&mut self);
}

/// Programmer errors and subscriber failures
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("cannot {action} from step {} ({:?})", .from.number(), .from)]
    InvalidTransition {
        from: WizardStep,
        action: &'static str,
    },

    #[error(transparent)]
    Relay(#[from] RelayError),
}

const SUB_PATH_CHANGED: &str = "wizard.path-changed";
const SUB_INSTALL_SUCCESS: &str = "wizard.install-success";
const SUB_NO_SUCH_DIRECTORY: &str = "wizard.no-such-directory";
const SUB_ECHO: &str = "wizard.echo";

/// Session state shared between the controller and its relay subscriptions
struct Session {
    step: WizardStep,
    shared_folder: Option<NormalizedPath>,
    can_advance: bool,
    reuse_notice: bool,
    summary: Option<SummaryStatus>,
    details_expanded: bool,
    ended: bool,
    view: Box<dyn WizardView>,
}

impl Session {
    fn context(&self) -> StepContext {
        let headline = match (self.step, self.summary) {
            (WizardStep::Introduction, _) => "Welcome to the maya foundation installer",
            (WizardStep::SelectFolder, _) => "Choosing the Shared Scripting folder",
            (WizardStep::Summary, Some(SummaryStatus::Failed)) => "Installation failed",
            (WizardStep::Summary, _) => "Installation completed successfully",
        };

        StepContext {
            headline,
            forward_label: self.step.forward_label(),
            back_enabled: self.step == WizardStep::SelectFolder,
            forward_enabled: self.forward_enabled(),
            shared_folder: self.shared_folder.clone(),
            reuse_notice: self.reuse_notice,
            summary: self.summary,
        }
    }

    fn forward_enabled(&self) -> bool {
        match self.step {
            WizardStep::SelectFolder => self.can_advance,
            _ => true,
        }
    }

    fn enter(&mut self, step: WizardStep, summary: Option<SummaryStatus>) {
        tracing::debug!("Switching from {:?} to {:?}", self.step, step);
        self.step = step;
        self.summary = summary;
        self.details_expanded = false;

        let context = self.context();
        self.view.enter_step(step, &context);
        self.view.set_can_advance(context.forward_enabled);
    }

    fn path_changed(&mut self, folder: Option<NormalizedPath>) {
        self.can_advance = folder.is_some();
        self.reuse_notice = folder
            .as_ref()
            .map(|f| f.join_file(files::SHARED_SETUP).exists())
            .unwrap_or(false);
        self.shared_folder = folder;

        let forward_enabled = self.forward_enabled();
        self.view.set_can_advance(forward_enabled);
        self.view.set_reuse_notice(self.reuse_notice);
    }

    fn path_error(&mut self, trace: &str) {
        let path = self
            .shared_folder
            .as_ref()
            .map(|f| f.as_str())
            .unwrap_or_default();
        let message = format!(
            "Looking for path '{}' gave an error. Are you sure it's the path you meant to install to?\n\n\
             Please try again with a different path or contact your nearest technical artist or network administrator",
            path
        );
        self.view.show_path_error(&message, trace);
        self.enter(WizardStep::SelectFolder, None);
    }
}

/// Drives the wizard: owns the current step and the installation engine
pub struct WizardController {
    engine: InstallationEngine,
    session: Rc<RefCell<Session>>,
}

impl WizardController {
    /// Subscribe to the engine's relay and show the introduction step
    pub fn new(engine: InstallationEngine, view: Box<dyn WizardView>) -> Self {
        let shared_folder = engine.shared_folder_path().cloned();
        let session = Rc::new(RefCell::new(Session {
            step: WizardStep::Introduction,
            can_advance: shared_folder.is_some(),
            reuse_notice: false,
            shared_folder,
            summary: None,
            details_expanded: false,
            ended: false,
            view,
        }));

        Self::subscribe(engine.relay(), &session);
        session.borrow_mut().enter(WizardStep::Introduction, None);

        Self { engine, session }
    }

    fn subscribe(relay: &EventRelay, session: &Rc<RefCell<Session>>) {
        let s = Rc::clone(session);
        relay.subscribe(SUB_PATH_CHANGED, Some(Topic::PathChanged), move |event| {
            if let Event::PathChanged(folder) = event {
                s.borrow_mut().path_changed(folder.clone());
            }
            Ok(())
        });

        let s = Rc::clone(session);
        relay.subscribe(SUB_INSTALL_SUCCESS, Some(Topic::InstallSuccess), move |_| {
            s.borrow_mut()
                .enter(WizardStep::Summary, Some(SummaryStatus::Succeeded));
            Ok(())
        });

        let s = Rc::clone(session);
        relay.subscribe(
            SUB_NO_SUCH_DIRECTORY,
            Some(Topic::InstallNoSuchDirectory),
            move |event| {
                if let Event::InstallNoSuchDirectory(trace) = event {
                    s.borrow_mut().path_error(trace);
                }
                Ok(())
            },
        );

        // INSTALLATION ERROR is handled where install() is called
        relay.subscribe(SUB_ECHO, None, |event| {
            tracing::info!("Controller received message '{}': {:?}", event.topic(), event);
            Ok(())
        });
    }

    pub fn step(&self) -> WizardStep {
        self.session.borrow().step
    }

    pub fn can_advance(&self) -> bool {
        self.session.borrow().can_advance
    }

    /// True when step 2 should note that an existing shared setup file is reused
    pub fn reuses_existing_shared_setup(&self) -> bool {
        self.session.borrow().reuse_notice
    }

    pub fn summary(&self) -> Option<SummaryStatus> {
        self.session.borrow().summary
    }

    pub fn details_expanded(&self) -> bool {
        self.session.borrow().details_expanded
    }

    pub fn session_ended(&self) -> bool {
        self.session.borrow().ended
    }

    pub fn engine(&self) -> &InstallationEngine {
        &self.engine
    }

    pub fn installation_success(&self) -> Option<bool> {
        self.engine.installation_success()
    }

    /// Installation log as shown in the details panel
    pub fn log(&self) -> String {
        self.engine.log()
    }

    /// 1 -> 2; 2 -> install -> 3 (if a folder is set); 3 -> end of session
    pub fn go_forward(&mut self) -> Result<(), WizardError> {
        let step = self.step();
        tracing::debug!("Forward requested on {:?}", step);

        match step {
            WizardStep::Introduction => {
                self.session
                    .borrow_mut()
                    .enter(WizardStep::SelectFolder, None);
            }
            WizardStep::SelectFolder => {
                if self.engine.shared_folder_path().is_none() {
                    tracing::debug!("No shared folder chosen, ignoring forward");
                    return Ok(());
                }
                self.run_install();
            }
            WizardStep::Summary => {
                tracing::debug!("Closing wizard");
                let mut session = self.session.borrow_mut();
                session.ended = true;
                session.view.close();
            }
        }

        Ok(())
    }

    /// 2 -> 1. Any other step is a wiring bug.
    pub fn go_back(&mut self) -> Result<(), WizardError> {
        let step = self.step();
        tracing::debug!("Back requested on {:?}", step);

        match step {
            WizardStep::SelectFolder => {
                self.session
                    .borrow_mut()
                    .enter(WizardStep::Introduction, None);
                Ok(())
            }
            from => Err(WizardError::InvalidTransition {
                from,
                action: "go back",
            }),
        }
    }

    /// Success and correctable outcomes arrive through the relay; unexpected
    /// failures are applied here.
    fn run_install(&mut self) {
        match self.engine.install() {
            Ok(InstallOutcome::Success) | Ok(InstallOutcome::CorrectablePathError(_)) => {}
            Ok(InstallOutcome::UnexpectedError(trace)) => {
                tracing::warn!("Controller encountered failure: {}", trace);
                self.fail();
            }
            Err(err) => {
                let formatted = format!("{:?}", anyhow::Error::new(err));
                tracing::error!("Subscriber failed during install: {}", formatted);
                self.engine
                    .add_log(format!("Exception encountered:\n{}", formatted));
                self.fail();
            }
        }
    }

    fn fail(&mut self) {
        self.session
            .borrow_mut()
            .enter(WizardStep::Summary, Some(SummaryStatus::Failed));
    }

    pub fn set_shared_folder_path(&mut self, raw: &str) -> Result<(), WizardError> {
        self.engine.set_shared_folder_path(raw)?;
        Ok(())
    }

    fn status(&self) -> SummaryStatus {
        self.summary().unwrap_or_else(|| {
            SummaryStatus::from_success(self.installation_success().unwrap_or(false))
        })
    }

    pub fn on_website_clicked(&mut self) -> Result<(), WizardError> {
        self.engine.open_product_page()?;
        let url = self.engine.product_url().to_string();
        self.session.borrow_mut().view.open_url(&url);
        Ok(())
    }

    pub fn on_back_clicked(&mut self) -> Result<(), WizardError> {
        self.go_back()
    }

    pub fn on_forward_clicked(&mut self) -> Result<(), WizardError> {
        self.go_forward()
    }

    /// A cancelled browse dialog passes `None` and changes nothing
    pub fn on_browse_clicked(&mut self, path: Option<&str>) -> Result<(), WizardError> {
        match path {
            Some(path) => self.set_shared_folder_path(path),
            None => Ok(()),
        }
    }

    pub fn on_path_field_changed(&mut self, raw: &str) -> Result<(), WizardError> {
        self.set_shared_folder_path(raw)
    }

    pub fn on_details_expanded(&mut self) {
        let status = self.status();
        let log = self.engine.log();
        let mut session = self.session.borrow_mut();
        session.details_expanded = true;
        session.view.show_details(status, &log);
    }

    pub fn on_details_collapsed(&mut self) {
        let status = self.status();
        let mut session = self.session.borrow_mut();
        session.details_expanded = false;
        session.view.hide_details(status);
    }
}
