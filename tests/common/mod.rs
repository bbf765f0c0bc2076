// Shared test helpers: fake /proc + /sys trees and a scripted command runner

#![allow(dead_code)]

use serverhealth::command::{CommandError, CommandRunner};
use serverhealth::procfs_repo::ProcfsRepo;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub const MEMINFO: &str = "\
MemTotal:       16000000 kB
MemFree:         8000000 kB
MemAvailable:   10000000 kB
Buffers:          123456 kB
Cached:          2345678 kB
";

pub const NET_DEV: &str = "\
Inter-|   Receive                                                |  Transmit
 face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed
    lo: 9876543   12345    0    0    0     0          0         0  9876543   12345    0    0    0     0       0          0
  eth0: 123456789  98765    0    0    0     0          0        12 23456789   54321    0    0    0     0       0          0
";

pub const DISKSTATS: &str = "\
   8       0 sda 1000 10 20000 500 2000 20 40000 800 0 900 1300
   8       1 sda1 900 9 18000 450 1900 19 38000 700 0 800 1200
   7       0 loop0 5 0 10 0 0 0 0 0 0 0 0
";

pub const PROC_STAT: &str = "cpu  4705 356 584 3699 23 23 0 0 0 0\ncpu0 4705 356 584 3699 23 23 0 0 0 0\n";

/// Temporary directory laid out like a host's /proc and /sys.
pub struct FakeHost {
    dir: tempfile::TempDir,
}

impl FakeHost {
    pub fn empty() -> Self {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("proc/net")).unwrap();
        std::fs::create_dir_all(dir.path().join("sys/class/thermal")).unwrap();
        Self { dir }
    }

    /// A host with every pseudo-file populated; mounts point at the real `/`.
    pub fn populated() -> Self {
        let host = Self::empty();
        host.write_proc("stat", PROC_STAT);
        host.write_proc("meminfo", MEMINFO);
        host.write_proc("net/dev", NET_DEV);
        host.write_proc("diskstats", DISKSTATS);
        host.write_proc(
            "mounts",
            "/dev/root / ext4 rw 0 0\nproc /proc proc rw 0 0\ntmpfs /run tmpfs rw 0 0\n",
        );
        host.add_thermal_zone("thermal_zone0", Some("x86_pkg_temp\n"), Some("45000\n"));
        host
    }

    pub fn proc_path(&self) -> PathBuf {
        self.dir.path().join("proc")
    }

    pub fn sys_path(&self) -> PathBuf {
        self.dir.path().join("sys")
    }

    pub fn repo(&self) -> ProcfsRepo {
        ProcfsRepo::new(self.proc_path(), self.sys_path())
    }

    pub fn write_proc(&self, relative: &str, content: &str) {
        write(&self.proc_path().join(relative), content);
    }

    pub fn add_thermal_zone(&self, zone: &str, type_: Option<&str>, temp: Option<&str>) {
        let dir = self.sys_path().join("class/thermal").join(zone);
        std::fs::create_dir_all(&dir).unwrap();
        if let Some(t) = type_ {
            write(&dir.join("type"), t);
        }
        if let Some(t) = temp {
            write(&dir.join("temp"), t);
        }
    }
}

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

/// Returns canned stdout per program name; unknown programs fail to spawn.
/// Records every invocation as `program arg1 arg2 ...`.
#[derive(Default)]
pub struct ScriptedRunner {
    outputs: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, program: &str, stdout: &str) -> Self {
        self.outputs.insert(program.to_string(), stdout.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<String, CommandError> {
        let mut call = program.to_string();
        for a in args {
            call.push(' ');
            call.push_str(a);
        }
        self.calls.lock().unwrap().push(call);
        match self.outputs.get(program) {
            Some(out) if out.trim().is_empty() => Err(CommandError::EmptyOutput {
                program: program.to_string(),
            }),
            Some(out) => Ok(out.clone()),
            None => Err(CommandError::Spawn {
                program: program.to_string(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            }),
        }
    }
}
