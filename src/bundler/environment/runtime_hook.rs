//! Startup hook for the packaged environment.

/// `sitecustomize.py` copied into the environment's `site-packages`.
///
/// Python imports it at interpreter startup, before user code. It prepends the
/// directories where conda keeps native DLLs to `PATH`, mirroring what conda-pack's
/// `activate.bat` does, so extension modules load without activating the environment.
pub const SITECUSTOMIZE: &str = r#"''' Invoked at python startup to make the environment's DLL directories discoverable.
'''
import os

prefix = os.path.normpath(os.path.join(os.path.dirname(__file__), '..', '..'))
os.environ["PATH"] = os.pathsep.join([
    os.path.join(prefix, 'Library', 'mingw-w64'),
    os.path.join(prefix, 'Library', 'usr', 'bin'),
    os.path.join(prefix, 'Library', 'bin'),
]) + os.pathsep + os.environ.get("PATH", "")
"#;
