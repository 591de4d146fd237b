//! Terminal rendering of the setup wizard
//!
//! Each step is printed as a page. Input lines are turned into the same
//! intents a windowed front end would send.

use crate::wizard::{StepContext, SummaryStatus, WizardController, WizardStep, WizardView};
use anyhow::{Context, Result};
use std::io::{BufRead, Write};

const RULE: &str = "=================================================";

/// [`WizardView`] writing plain text to any writer
pub struct ConsoleView {
    out: Box<dyn Write>,
}

impl ConsoleView {
    pub fn new(out: Box<dyn Write>) -> Self {
        Self { out }
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(std::io::stdout()))
    }

    /// Discards everything, for silent runs
    pub fn quiet() -> Self {
        Self::new(Box::new(std::io::sink()))
    }

    fn print(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text).and_then(|_| self.out.flush()) {
            tracing::debug!("Console write failed: {}", e);
        }
    }
}

impl WizardView for ConsoleView {
    fn enter_step(&mut self, step: WizardStep, context: &StepContext) {
        self.print(&format!(
            "\n{}\n  Step {}/{}: {}\n{}\n",
            RULE,
            step.number(),
            WizardStep::total_steps(),
            step.title(),
            RULE
        ));
        self.print(context.headline);

        match step {
            WizardStep::Introduction => {
                self.print(
                    "\nThis installer makes Maya load scripts from a Shared Scripting folder on startup.",
                );
            }
            WizardStep::SelectFolder => {
                if let Some(ref folder) = context.shared_folder {
                    self.print(&format!("\nCurrent folder: {}", folder));
                }
                if context.reuse_notice {
                    self.print(REUSE_NOTICE);
                }
            }
            WizardStep::Summary => {
                if let Some(status) = context.summary {
                    self.print(&format!("\n{}", status.long_text()));
                }
            }
        }
    }

    fn set_can_advance(&mut self, enabled: bool) {
        tracing::trace!("Forward button enabled: {}", enabled);
    }

    fn set_reuse_notice(&mut self, visible: bool) {
        if visible {
            self.print(REUSE_NOTICE);
        }
    }

    fn show_path_error(&mut self, message: &str, _trace: &str) {
        self.print(&format!("\nPath error\n\n{}\n", message));
    }

    fn show_details(&mut self, status: SummaryStatus, log: &str) {
        self.print(&format!(
            "\n{}\n\nInstallation details:\n\n{}\n",
            status.short_text(),
            log
        ));
    }

    fn hide_details(&mut self, status: SummaryStatus) {
        self.print(&format!("\n{}", status.long_text()));
    }

    fn open_url(&mut self, url: &str) {
        self.print(&format!("Product page: {}", url));
    }

    fn close(&mut self) {
        self.print("Goodbye.");
    }
}

const REUSE_NOTICE: &str =
    "After installation Maya will use the pre-existing file 'sharedUserSetup.py' from this folder.";

fn prompt_for(step: WizardStep) -> &'static str {
    match step {
        WizardStep::Introduction => "[Enter] Continue, (w)ebsite, (q)uit: ",
        WizardStep::SelectFolder => {
            "Shared Scripting folder (type a path, [Enter] Install, :back, :quit): "
        }
        WizardStep::Summary => "[Enter] Close, (d)etails: ",
    }
}

/// Run the wizard against line-based input until the session ends, the user
/// quits, or input runs out
pub fn run_interactive<R: BufRead>(
    wizard: &mut WizardController,
    mut input: R,
    prompt_out: &mut dyn Write,
) -> Result<()> {
    while !wizard.session_ended() {
        let step = wizard.step();
        write!(prompt_out, "{}", prompt_for(step))?;
        prompt_out.flush()?;

        let mut line = String::new();
        let read = input.read_line(&mut line).context("Failed to read input")?;
        if read == 0 {
            tracing::info!("Input closed on {:?}, leaving wizard", step);
            return Ok(());
        }
        let line = line.trim();

        match (step, line) {
            (WizardStep::Introduction, "") => wizard.on_forward_clicked()?,
            (WizardStep::Introduction, "w") => wizard.on_website_clicked()?,
            (WizardStep::Introduction, "q") | (WizardStep::SelectFolder, ":quit") => {
                return Ok(())
            }
            (WizardStep::SelectFolder, ":back") => wizard.on_back_clicked()?,
            (WizardStep::SelectFolder, "") => {
                if !wizard.can_advance() {
                    writeln!(prompt_out, "Please enter a folder first.")?;
                    continue;
                }
                wizard.on_forward_clicked()?;
            }
            (WizardStep::SelectFolder, path) if !path.starts_with(':') => {
                wizard.on_path_field_changed(path)?;
                if let Some(folder) = wizard.engine().shared_folder_path() {
                    writeln!(prompt_out, "Shared folder set to {}", folder)?;
                }
            }
            (WizardStep::Summary, "") => wizard.on_forward_clicked()?,
            (WizardStep::Summary, "d") => {
                if wizard.details_expanded() {
                    wizard.on_details_collapsed();
                } else {
                    wizard.on_details_expanded();
                }
            }
            (_, other) => {
                writeln!(prompt_out, "Unrecognized input '{}'", other)?;
            }
        }
    }

    Ok(())
}
