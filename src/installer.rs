//! Installer - shared folder bootstrap installation
//!
//! Writes three files, in this order:
//!
//! 1. `sharedUserSetup.py` in the shared folder, only if it does not exist yet.
//!    After that it belongs to the user and is never overwritten.
//! 2. `userSetup.py` in the host's user script directory, created or appended
//!    to so that it imports the bootstrap module. Left alone if an active
//!    import is already there.
//! 3. `foundationBoot.py` next to it, rewritten on every run with the
//!    currently configured shared folder.
//!
//! Each step is idempotent on its own, so running the installer again after a
//! partial failure simply finishes the job.
//!
//! Failures are classified into an [`InstallOutcome`]. A missing, unreadable
//! or unreachable target directory is correctable (the user picks another
//! folder). Anything else is unexpected. Both are announced on the relay and recorded in the engine's
//! own state, so a caller can either subscribe or poll.

use crate::paths::{self, files, NormalizedPath};
use crate::relay::{Event, EventRelay, RelayError};
use crate::templates;
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Result of one `install()` attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    Success,

    /// A target directory is missing or unreachable. Carries the trace.
    CorrectablePathError(String),

    /// Any other failure. Carries the trace.
    UnexpectedError(String),
}

impl InstallOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, InstallOutcome::Success)
    }

    pub fn trace(&self) -> Option<&str> {
        match self {
            InstallOutcome::Success => None,
            InstallOutcome::CorrectablePathError(trace) | InstallOutcome::UnexpectedError(trace) => {
                Some(trace)
            }
        }
    }
}

/// Failure inside one of the installation steps
#[derive(Debug, thiserror::Error)]
pub enum InstallFault {
    #[error("no shared folder has been chosen")]
    NoSharedFolder,

    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Relay(#[from] RelayError),
}

impl InstallFault {
    /// True if a target directory is absent or cannot be reached, so picking
    /// another folder may fix it
    pub fn is_path_unreachable(&self) -> bool {
        match self {
            InstallFault::Read { source, .. } | InstallFault::Write { source, .. } => matches!(
                source.kind(),
                io::ErrorKind::NotFound
                    | io::ErrorKind::NotADirectory
                    | io::ErrorKind::PermissionDenied
                    | io::ErrorKind::NetworkUnreachable
                    | io::ErrorKind::HostUnreachable
            ),
            _ => false,
        }
    }
}

/// Serializable summary of the engine state after an install
#[derive(Debug, Clone, Serialize)]
pub struct InstallReport {
    pub success: Option<bool>,
    pub shared_folder: Option<NormalizedPath>,
    pub files: Vec<PathBuf>,
    pub log: Vec<String>,
}

/// Owns installation state and performs the installation transaction
#[derive(Debug)]
pub struct InstallationEngine {
    relay: Rc<EventRelay>,
    user_script_dir: PathBuf,
    product_url: String,

    shared_folder_path: Option<NormalizedPath>,
    shared_setup_file: Option<PathBuf>,
    log: Vec<String>,
    installation_success: Option<bool>,
}

impl InstallationEngine {
    pub fn new(relay: Rc<EventRelay>, user_script_dir: impl Into<PathBuf>) -> Self {
        let user_script_dir = user_script_dir.into();
        tracing::debug!("User script directory: {:?}", user_script_dir);

        Self {
            relay,
            user_script_dir,
            product_url: crate::config::DEFAULT_PRODUCT_URL.to_string(),
            shared_folder_path: None,
            shared_setup_file: None,
            log: Vec::new(),
            installation_success: None,
        }
    }

    pub fn with_product_url(mut self, url: impl Into<String>) -> Self {
        self.product_url = url.into();
        self
    }

    pub fn relay(&self) -> &Rc<EventRelay> {
        &self.relay
    }

    pub fn shared_folder_path(&self) -> Option<&NormalizedPath> {
        self.shared_folder_path.as_ref()
    }

    pub fn shared_setup_file(&self) -> Option<&Path> {
        self.shared_setup_file.as_deref()
    }

    pub fn user_script_dir(&self) -> &Path {
        &self.user_script_dir
    }

    pub fn user_setup_file(&self) -> PathBuf {
        self.user_script_dir.join(files::USER_SETUP)
    }

    pub fn boot_file(&self) -> PathBuf {
        self.user_script_dir.join(files::BOOT)
    }

    pub fn product_url(&self) -> &str {
        &self.product_url
    }

    /// `None` until the first install attempt
    pub fn installation_success(&self) -> Option<bool> {
        self.installation_success
    }

    pub fn log_entries(&self) -> &[String] {
        &self.log
    }

    /// The log as displayed to the user, entries separated by a blank line
    pub fn log(&self) -> String {
        self.log.join("\n\n")
    }

    pub fn add_log(&mut self, entry: impl Into<String>) {
        self.log.push(entry.into());
    }

    /// Set the shared folder from raw user input. Blank input clears it.
    pub fn set_shared_folder_path(&mut self, raw: &str) -> Result<(), RelayError> {
        if paths::is_blank(raw) {
            self.shared_folder_path = None;
            self.shared_setup_file = None;
        } else {
            let folder = paths::normalize(raw);
            self.shared_setup_file = Some(folder.join_file(files::SHARED_SETUP));
            self.shared_folder_path = Some(folder);
        }

        tracing::debug!("Shared folder path is now {:?}", self.shared_folder_path);
        self.relay
            .publish(Event::PathChanged(self.shared_folder_path.clone()))
    }

    /// True if install will create the shared setup file. False means an
    /// existing file will be reused, or no folder is chosen.
    pub fn will_write_shared_setup(&self) -> bool {
        match self.shared_setup_file {
            Some(ref file) => !file.exists(),
            None => false,
        }
    }

    /// Ask the rendering layer to show the product page
    pub fn open_product_page(&self) -> Result<(), RelayError> {
        self.relay
            .publish(Event::OpenedProductPage(self.product_url.clone()))
    }

    /// Run the installation transaction
    ///
    /// Install failures come back as an [`InstallOutcome`]. Only a failing
    /// relay subscriber produces an `Err`, after it has been logged and
    /// announced as `InstallError` like any other unexpected failure.
    pub fn install(&mut self) -> Result<InstallOutcome, RelayError> {
        tracing::info!(
            "Installing with shared folder {:?} into {:?}",
            self.shared_folder_path,
            self.user_script_dir
        );

        let fault = match self.run_steps() {
            Ok(()) => match self.relay.publish(Event::InstallSuccess) {
                Ok(()) => {
                    tracing::info!("Successful install");
                    self.installation_success = Some(true);
                    return Ok(InstallOutcome::Success);
                }
                Err(err) => InstallFault::Relay(err),
            },
            Err(fault) => fault,
        };

        self.installation_success = Some(false);

        if let InstallFault::Relay(err) = fault {
            let trace = render_trace(&err);
            tracing::warn!("Subscriber failed during install");
            self.add_log(trace.clone());
            if let Err(again) = self.relay.publish(Event::InstallError(trace)) {
                tracing::debug!("Ignoring failure while reporting install error: {}", again);
            }
            return Err(err);
        }

        let correctable = fault.is_path_unreachable();
        let trace = format!("{:?}", anyhow::Error::new(fault));
        self.add_log(trace.clone());

        if correctable {
            tracing::warn!("Target directory missing or unreachable during install");
            self.relay
                .publish(Event::InstallNoSuchDirectory(trace.clone()))?;
            Ok(InstallOutcome::CorrectablePathError(trace))
        } else {
            tracing::warn!("Unexpected failure during install");
            self.relay.publish(Event::InstallError(trace.clone()))?;
            Ok(InstallOutcome::UnexpectedError(trace))
        }
    }

    pub fn report(&self) -> InstallReport {
        let mut files = Vec::new();
        if let Some(ref shared) = self.shared_setup_file {
            files.push(shared.clone());
        }
        files.push(self.user_setup_file());
        files.push(self.boot_file());

        InstallReport {
            success: self.installation_success,
            shared_folder: self.shared_folder_path.clone(),
            files,
            log: self.log.clone(),
        }
    }

    fn run_steps(&mut self) -> Result<(), InstallFault> {
        let folder = self
            .shared_folder_path
            .clone()
            .ok_or(InstallFault::NoSharedFolder)?;

        if self.will_write_shared_setup() {
            self.write_shared_setup()?;
        } else {
            tracing::info!("Reusing existing {} in {}", files::SHARED_SETUP, folder);
        }

        self.write_or_append_user_setup()?;
        self.write_boot(&folder)?;

        Ok(())
    }

    fn write_shared_setup(&mut self) -> Result<(), InstallFault> {
        let path = self
            .shared_setup_file
            .clone()
            .ok_or(InstallFault::NoSharedFolder)?;

        write_file(&path, templates::SHARED_USER_SETUP)?;
        self.add_log(format!("Created file:\n{}", path.display()));
        self.relay.publish(Event::WroteSharedSetup(path))?;

        Ok(())
    }

    fn write_or_append_user_setup(&mut self) -> Result<(), InstallFault> {
        let path = self.user_setup_file();
        let line = templates::user_setup_line(&templates::timestamp_now());

        if path.exists() {
            let content = read_file(&path)?;
            if templates::has_active_marker(&content) {
                tracing::info!("{:?} already imports the bootstrap module", path);
                return Ok(());
            }

            // Blank line between existing content and ours
            let separator = if content.is_empty() || content.ends_with('\n') {
                "\n"
            } else {
                "\n\n"
            };
            append_file(&path, &format!("{}{}\n", separator, line))?;
            self.add_log(format!(
                "Appended boot information to file:\n{}",
                path.display()
            ));
        } else {
            write_file(&path, &format!("{}\n", line))?;
            self.add_log(format!("Created file:\n{}", path.display()));
        }

        self.relay.publish(Event::ProcessedUserSetup(path))?;
        Ok(())
    }

    fn write_boot(&mut self, folder: &NormalizedPath) -> Result<(), InstallFault> {
        let path = self.boot_file();
        let preexisting = path.exists();

        write_file(&path, &templates::boot_content(folder))?;

        if preexisting {
            self.add_log(format!("Overwrote file:\n{}", path.display()));
        } else {
            self.add_log(format!("Created file:\n{}", path.display()));
        }

        self.relay.publish(Event::WroteBoot(path))?;
        Ok(())
    }
}

/// The error and its sources, one per line
fn render_trace(err: &(dyn std::error::Error + 'static)) -> String {
    anyhow::Chain::new(err)
        .map(|cause| cause.to_string())
        .collect::<Vec<_>>()
        .join("\n\nCaused by: ")
}

fn read_file(path: &Path) -> Result<String, InstallFault> {
    fs::read_to_string(path).map_err(|source| InstallFault::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, content: &str) -> Result<(), InstallFault> {
    fs::write(path, content).map_err(|source| InstallFault::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!("Created file {:?}", path);
    Ok(())
}

fn append_file(path: &Path, content: &str) -> Result<(), InstallFault> {
    let to_fault = |source: io::Error| InstallFault::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut file = fs::OpenOptions::new()
        .append(true)
        .open(path)
        .map_err(to_fault)?;
    file.write_all(content.as_bytes()).map_err(to_fault)?;

    tracing::info!("Appended to file {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relay::Topic;
    use std::cell::RefCell;
    use tempfile::TempDir;

    struct Fixture {
        _root: TempDir,
        shared: PathBuf,
        scripts: PathBuf,
        relay: Rc<EventRelay>,
        events: Rc<RefCell<Vec<Event>>>,
        engine: InstallationEngine,
    }

    fn fixture() -> Fixture {
        let root = TempDir::new().unwrap();
        let shared = root.path().join("shared");
        let scripts = root.path().join("scripts");
        fs::create_dir_all(&shared).unwrap();
        fs::create_dir_all(&scripts).unwrap();

        let relay = Rc::new(EventRelay::new());
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        relay.subscribe("recorder", None, move |event| {
            sink.borrow_mut().push(event.clone());
            Ok(())
        });

        let engine = InstallationEngine::new(Rc::clone(&relay), &scripts);

        Fixture {
            _root: root,
            shared,
            scripts,
            relay,
            events,
            engine,
        }
    }

    fn topics(events: &Rc<RefCell<Vec<Event>>>) -> Vec<Topic> {
        events.borrow().iter().map(Event::topic).collect()
    }

    #[test]
    fn test_set_path_normalizes_and_derives_setup_file() {
        let mut fx = fixture();
        fx.engine.set_shared_folder_path("/tmp/shared").unwrap();

        assert_eq!(fx.engine.shared_folder_path().unwrap().as_str(), "/tmp/shared/");
        assert_eq!(
            fx.engine.shared_setup_file(),
            Some(Path::new("/tmp/shared/sharedUserSetup.py"))
        );
        assert_eq!(
            *fx.events.borrow(),
            vec![Event::PathChanged(Some(paths::normalize("/tmp/shared")))]
        );
    }

    #[test]
    fn test_blank_path_clears_state() {
        let mut fx = fixture();
        fx.engine.set_shared_folder_path("/tmp/shared").unwrap();

        for blank in ["", "   ", "\t"] {
            fx.engine.set_shared_folder_path(blank).unwrap();
            assert!(fx.engine.shared_folder_path().is_none());
            assert!(fx.engine.shared_setup_file().is_none());
            assert!(!fx.engine.will_write_shared_setup());
        }
        assert_eq!(fx.events.borrow().last(), Some(&Event::PathChanged(None)));
    }

    #[test]
    fn test_add_log_separates_entries() {
        let mut fx = fixture();
        assert_eq!(fx.engine.log(), "");
        fx.engine.add_log("one");
        assert_eq!(fx.engine.log(), "one");
        fx.engine.add_log("two");
        assert_eq!(fx.engine.log(), "one\n\ntwo");
    }

    #[test]
    fn test_fresh_install_writes_all_files() {
        let mut fx = fixture();
        fx.engine
            .set_shared_folder_path(fx.shared.to_str().unwrap())
            .unwrap();
        assert!(fx.engine.will_write_shared_setup());

        let outcome = fx.engine.install().unwrap();
        assert_eq!(outcome, InstallOutcome::Success);
        assert_eq!(fx.engine.installation_success(), Some(true));

        let shared_setup = fs::read_to_string(fx.shared.join(files::SHARED_SETUP)).unwrap();
        assert_eq!(shared_setup, templates::SHARED_USER_SETUP);

        let user_setup = fs::read_to_string(fx.scripts.join(files::USER_SETUP)).unwrap();
        assert_eq!(user_setup.lines().filter(|l| templates::is_active_marker(l)).count(), 1);

        let boot = fs::read_to_string(fx.scripts.join(files::BOOT)).unwrap();
        let folder = fx.engine.shared_folder_path().unwrap().clone();
        assert_eq!(boot, templates::boot_content(&folder));

        assert_eq!(
            topics(&fx.events),
            vec![
                Topic::PathChanged,
                Topic::WroteSharedSetup,
                Topic::ProcessedUserSetup,
                Topic::WroteBoot,
                Topic::InstallSuccess,
            ]
        );
        assert_eq!(fx.engine.log_entries().len(), 3);
        assert!(fx.engine.log_entries()[0].starts_with("Created file:\n"));
    }

    #[test]
    fn test_second_install_is_idempotent() {
        let mut fx = fixture();
        fx.engine
            .set_shared_folder_path(fx.shared.to_str().unwrap())
            .unwrap();
        fx.engine.install().unwrap();

        let shared_path = fx.shared.join(files::SHARED_SETUP);
        fs::write(&shared_path, "# my own startup code\n").unwrap();
        let user_before = fs::read_to_string(fx.scripts.join(files::USER_SETUP)).unwrap();
        let boot_before = fs::read_to_string(fx.scripts.join(files::BOOT)).unwrap();

        assert!(!fx.engine.will_write_shared_setup());
        let outcome = fx.engine.install().unwrap();
        assert!(outcome.is_success());

        assert_eq!(fs::read_to_string(&shared_path).unwrap(), "# my own startup code\n");
        assert_eq!(
            fs::read_to_string(fx.scripts.join(files::USER_SETUP)).unwrap(),
            user_before
        );
        assert_eq!(
            fs::read_to_string(fx.scripts.join(files::BOOT)).unwrap(),
            boot_before
        );
        assert!(fx
            .engine
            .log_entries()
            .last()
            .unwrap()
            .starts_with("Overwrote file:\n"));
    }

    #[test]
    fn test_user_setup_without_marker_is_appended() {
        let mut fx = fixture();
        let user_setup = fx.scripts.join(files::USER_SETUP);
        fs::write(&user_setup, "import maya.cmds as mc\n").unwrap();

        fx.engine
            .set_shared_folder_path(fx.shared.to_str().unwrap())
            .unwrap();
        fx.engine.install().unwrap();

        let content = fs::read_to_string(&user_setup).unwrap();
        assert!(content.starts_with("import maya.cmds as mc\n\nimport foundationBoot # "));
        assert!(content.ends_with('\n'));
        assert!(fx
            .engine
            .log()
            .contains("Appended boot information to file:\n"));
    }

    #[test]
    fn test_user_setup_with_active_marker_is_untouched() {
        let mut fx = fixture();
        let user_setup = fx.scripts.join(files::USER_SETUP);
        fs::write(&user_setup, "import foundationBoot\nimport os").unwrap();

        fx.engine
            .set_shared_folder_path(fx.shared.to_str().unwrap())
            .unwrap();
        fx.engine.install().unwrap();

        assert_eq!(
            fs::read_to_string(&user_setup).unwrap(),
            "import foundationBoot\nimport os"
        );
        assert!(!topics(&fx.events).contains(&Topic::ProcessedUserSetup));
    }

    #[test]
    fn test_disabled_marker_leaves_two_imports() {
        // A commented import counts as "not installed", so the file ends up
        // with the dead line plus a live one.
        let mut fx = fixture();
        let user_setup = fx.scripts.join(files::USER_SETUP);
        fs::write(&user_setup, "# import foundationBoot").unwrap();

        fx.engine
            .set_shared_folder_path(fx.shared.to_str().unwrap())
            .unwrap();
        fx.engine.install().unwrap();
        fx.engine.install().unwrap();

        let content = fs::read_to_string(&user_setup).unwrap();
        assert!(content.starts_with("# import foundationBoot\n\nimport foundationBoot # "));
        assert_eq!(content.matches(templates::IMPORT_MARKER).count(), 2);
        assert_eq!(content.lines().filter(|l| templates::is_active_marker(l)).count(), 1);
    }

    #[test]
    fn test_missing_shared_folder_is_correctable() {
        let mut fx = fixture();
        let missing = fx.shared.join("does-not-exist");
        fx.engine
            .set_shared_folder_path(missing.to_str().unwrap())
            .unwrap();

        let outcome = fx.engine.install().unwrap();
        assert!(matches!(outcome, InstallOutcome::CorrectablePathError(_)));
        assert_eq!(fx.engine.installation_success(), Some(false));

        assert!(!missing.exists());
        assert!(!fx.scripts.join(files::USER_SETUP).exists());
        assert!(!fx.scripts.join(files::BOOT).exists());

        assert_eq!(
            topics(&fx.events),
            vec![Topic::PathChanged, Topic::InstallNoSuchDirectory]
        );
        let trace = outcome.trace().unwrap();
        assert!(trace.contains("failed to write"));
        assert_eq!(fx.engine.log(), trace);
    }

    #[test]
    fn test_other_io_failure_is_unexpected() {
        let mut fx = fixture();
        // A directory where the bootstrap file should go cannot be written
        fs::create_dir_all(fx.scripts.join(files::BOOT)).unwrap();

        fx.engine
            .set_shared_folder_path(fx.shared.to_str().unwrap())
            .unwrap();
        let outcome = fx.engine.install().unwrap();

        assert!(matches!(outcome, InstallOutcome::UnexpectedError(_)));
        assert_eq!(fx.engine.installation_success(), Some(false));
        assert_eq!(topics(&fx.events).last(), Some(&Topic::InstallError));
        // Earlier steps stay done
        assert!(fx.shared.join(files::SHARED_SETUP).exists());
        assert!(fx.scripts.join(files::USER_SETUP).exists());
    }

    #[test]
    fn test_install_without_folder_is_unexpected() {
        let mut fx = fixture();
        let outcome = fx.engine.install().unwrap();
        assert!(matches!(outcome, InstallOutcome::UnexpectedError(ref t) if t.contains("no shared folder")));
        assert_eq!(fx.engine.installation_success(), Some(false));
    }

    #[test]
    fn test_failing_subscriber_propagates() {
        let mut fx = fixture();
        fx.relay.subscribe("broken", Some(Topic::WroteBoot), |_| {
            anyhow::bail!("display went away")
        });
        fx.engine
            .set_shared_folder_path(fx.shared.to_str().unwrap())
            .unwrap();

        let err = fx.engine.install().unwrap_err();
        assert!(err.to_string().contains("broken"));
        assert_eq!(fx.engine.installation_success(), Some(false));
        assert!(!topics(&fx.events).contains(&Topic::InstallSuccess));
    }

    #[test]
    fn test_failing_subscriber_is_logged_and_announced() {
        let mut fx = fixture();
        fx.relay.subscribe("broken", Some(Topic::WroteBoot), |_| {
            anyhow::bail!("display went away")
        });
        fx.engine
            .set_shared_folder_path(fx.shared.to_str().unwrap())
            .unwrap();

        assert!(fx.engine.install().is_err());
        assert!(fx.engine.log().contains("display went away"));
        assert_eq!(
            topics(&fx.events),
            vec![
                Topic::PathChanged,
                Topic::WroteSharedSetup,
                Topic::ProcessedUserSetup,
                Topic::WroteBoot,
                Topic::InstallError,
            ]
        );
    }

    #[test]
    fn test_failure_while_announcing_error_keeps_first_error() {
        let mut fx = fixture();
        fx.relay.subscribe("broken", Some(Topic::WroteBoot), |_| {
            anyhow::bail!("first")
        });
        fx.relay.subscribe("also-broken", Some(Topic::InstallError), |_| {
            anyhow::bail!("second")
        });
        fx.engine
            .set_shared_folder_path(fx.shared.to_str().unwrap())
            .unwrap();

        let err = fx.engine.install().unwrap_err();
        assert!(matches!(err, RelayError::Handler { ref subscriber, .. } if subscriber.as_str() == "broken"));
        assert_eq!(fx.engine.installation_success(), Some(false));
    }

    #[test]
    fn test_failing_success_subscriber_marks_install_failed() {
        let mut fx = fixture();
        fx.relay.subscribe("broken", Some(Topic::InstallSuccess), |_| {
            anyhow::bail!("summary page gone")
        });
        fx.engine
            .set_shared_folder_path(fx.shared.to_str().unwrap())
            .unwrap();

        assert!(fx.engine.install().is_err());
        assert_eq!(fx.engine.installation_success(), Some(false));
        assert!(fx.engine.log().contains("summary page gone"));
        assert_eq!(topics(&fx.events).last(), Some(&Topic::InstallError));
    }

    fn write_fault(kind: io::ErrorKind) -> InstallFault {
        InstallFault::Write {
            path: PathBuf::from("/mnt/share/sharedUserSetup.py"),
            source: io::Error::from(kind),
        }
    }

    #[test]
    fn test_unreachable_folder_kinds_are_correctable() {
        for kind in [
            io::ErrorKind::NotFound,
            io::ErrorKind::NotADirectory,
            io::ErrorKind::PermissionDenied,
            io::ErrorKind::NetworkUnreachable,
            io::ErrorKind::HostUnreachable,
        ] {
            assert!(write_fault(kind).is_path_unreachable(), "{:?}", kind);
        }
    }

    #[test]
    fn test_other_kinds_are_not_correctable() {
        for kind in [
            io::ErrorKind::IsADirectory,
            io::ErrorKind::StorageFull,
            io::ErrorKind::InvalidData,
        ] {
            assert!(!write_fault(kind).is_path_unreachable(), "{:?}", kind);
        }
        assert!(!InstallFault::NoSharedFolder.is_path_unreachable());
    }

    #[test]
    fn test_report_lists_files() {
        let mut fx = fixture();
        fx.engine
            .set_shared_folder_path(fx.shared.to_str().unwrap())
            .unwrap();
        fx.engine.install().unwrap();

        let report = fx.engine.report();
        assert_eq!(report.success, Some(true));
        assert_eq!(report.files.len(), 3);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["success"], serde_json::Value::Bool(true));
    }

    #[test]
    fn test_open_product_page_publishes_url() {
        let fx = fixture();
        let engine = fx.engine.with_product_url("https://example.com");
        engine.open_product_page().unwrap();
        assert_eq!(
            fx.events.borrow().last(),
            Some(&Event::OpenedProductPage("https://example.com".to_string()))
        );
    }
}
