//! Generated file contents
//!
//! The shared setup file is written once and then belongs to the user. The
//! bootstrap module is owned by the installer and regenerated on every run.
//! The user setup file only ever gains an import line.

use crate::paths::{files, NormalizedPath};

/// Substring identifying the bootstrap import in the user setup file
pub const IMPORT_MARKER: &str = "import foundationBoot";

/// Lines starting with this are comments in the host's script language
pub const COMMENT_PREFIX: char = '#';

/// Initial content of `sharedUserSetup.py`
pub const SHARED_USER_SETUP: &str = r#"#!/usr/bin/env python
#
# sharedUserSetup.py
# mayaPyTools
"""sharedUserSetup.py acts like userSetup.py in that Maya executes any commands
in the file during startup.

The below text is copied from Maya's documentation:

Maya runs any Python commands in the sharedUserSetup.py file whenever it starts
up. You can use this file to set up your working environment or execute commonly
used Python commands such as importing the maya.cmds module.

The sharedUserSetup.py script is executed during the initialization and setup
phase of Maya; therefore, only commands which set up your working environment
and have no dependencies on Maya functionality can be successfully run in this
script.

Note: You can use maya.utils.executeDeferred() to delay code execution until
after the Maya scene is initialized. For more information, see maya.utils.
"""
################################################################################
# IMPORT BLOCK
import maya.utils

# Instantiate logger class
import logging
L = logging.getLogger( __name__ )
L.setLevel(logging.INFO)
if not L.handlers:
	ch = logging.StreamHandler()
	ch.setFormatter( logging.Formatter("%(name)s : %(levelname)s : %(message)s") )
	L.addHandler(ch)
# HOW TO USE THE LOGGER:
# Instead of "print" use the following code snippets:
# L.debug("Debug message")
# L.info("Info)
# L.warn("A warning, but nothing we can't handle...")
# L.error("An error has occured, time to take drastic measures")
# L.fatal("A problem so huge we can't do anything but fail the entire program!")
#
# By changing the level of the logger you can decide how much information to
# print out. E.g.:
# L.setLevel(logging.DEBUG) - Logging messages above the setLevel threshhold
# is printed, in this case all messages would be printed.

################################################################################
# FUNCTIONS BLOCK
def executedDeferred():
	"""These commands are run after Maya is done initializing, so here we do
	have full access to Maya functionality"""
	#exampleFunction() # Uncomment this to run this function during startup
	reportLoaded()

def reportLoaded():
	L.info( "Loaded" )

def exampleFunction():
	"""Simple test function"""
	print("HELLO WORLD! You can see this message in the script output window")


################################################################################
# COMMANDS BLOCK
maya.utils.executeDeferred( executedDeferred )
"#;

/// Content of `foundationBoot.py` pointing the host at `shared_folder`
pub fn boot_content(shared_folder: &NormalizedPath) -> String {
    format!(
        r#"#!/usr/bin/env python
#
# foundation_boot.py
# mayaPyTools
#
"""Bootstrap module for loading scripts from the Shared Scripting folder.
Generated by the installer, edit at your own risk"""

import sys, os

def getToolPath():
	"""Return shared folder path.

	This variable is set through the installer"""
	path = '{path}'
	return path

def startModules():
	"""Look for {shared_setup} and import it if possible"""
	try:
		import sharedUserSetup
	except ImportError as e:
		import traceback
		import maya.utils
		stack = traceback.format_exc()
		maya.utils.executeDeferred( reportErrorDuringLoad, e, stack )

def reportErrorDuringLoad(e, stack):
	print(stack)
	import maya.OpenMaya
	msg = "maya foundation failed to start: %s" % e
	maya.OpenMaya.MGlobal.displayError(msg)

sys.path.append( getToolPath() )
startModules()
"#,
        path = shared_folder.as_str(),
        shared_setup = files::SHARED_SETUP,
    )
}

/// Import line for the user setup file, stamped with `timestamp`
pub fn user_setup_line(timestamp: &str) -> String {
    format!(
        "{} # Initialize maya foundation booter. This line added {}",
        IMPORT_MARKER, timestamp
    )
}

/// Current local time in the format used by [`user_setup_line`]
pub fn timestamp_now() -> String {
    chrono::Local::now()
        .format("%Y-%m-%d %H:%M:%S%.6f")
        .to_string()
}

/// A line counts as an active import only if it contains the marker and is
/// not commented out. Leading whitespace before `#` makes it count as active.
pub fn is_active_marker(line: &str) -> bool {
    line.contains(IMPORT_MARKER) && !line.starts_with(COMMENT_PREFIX)
}

/// True if any line of `content` is an active import
pub fn has_active_marker(content: &str) -> bool {
    content.lines().any(is_active_marker)
}
