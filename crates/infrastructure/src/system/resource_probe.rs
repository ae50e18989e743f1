use ferrous_watch_application::ports::{ProcessResources, ResourceProbe};
use std::sync::{Mutex, PoisonError};
use sysinfo::{Pid, ProcessesToUpdate, System};

/// Live process and host readings via `sysinfo`.
pub struct SysinfoResourceProbe {
    system: Mutex<System>,
    pid: Pid,
}

impl SysinfoResourceProbe {
    pub fn new() -> Self {
        Self {
            system: Mutex::new(System::new()),
            pid: Pid::from(std::process::id() as usize),
        }
    }
}

impl Default for SysinfoResourceProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceProbe for SysinfoResourceProbe {
    fn snapshot(&self) -> ProcessResources {
        let mut system = self.system.lock().unwrap_or_else(PoisonError::into_inner);
        system.refresh_memory();
        system.refresh_cpu_usage();
        system.refresh_processes(ProcessesToUpdate::Some(&[self.pid]), true);

        let (memory_used_bytes, uptime_seconds) = system
            .process(self.pid)
            .map(|p| (p.memory(), p.run_time()))
            .unwrap_or((0, 0));
        let load = System::load_average();

        ProcessResources {
            memory_used_bytes,
            total_memory_bytes: system.total_memory(),
            cpu_usage_percent: system.global_cpu_usage(),
            cpu_count: system.cpus().len(),
            load_average: [load.one, load.five, load.fifteen],
            uptime_seconds,
        }
    }
}
