// ABOUTME: Test support utilities.
// ABOUTME: Provides a scripted in-memory controller and tracing setup for integration tests.

// Each test binary only uses some of these helpers.
#![allow(dead_code)]

use async_trait::async_trait;
use maas_redeploy::controller::{
    BootResourceOps, ControllerError, ImageCatalogEntry, MachineOps, MachineState, MachineStatus,
};
use maas_redeploy::types::SystemId;
use parking_lot::Mutex;
use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter =
            EnvFilter::from_default_env().add_directive("maas_redeploy=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

pub fn system_id(value: &str) -> SystemId {
    SystemId::new(value).unwrap()
}

fn rejected(method: &str, path: &str) -> ControllerError {
    ControllerError::Status {
        method: method.to_string(),
        path: path.to_string(),
        status: 503,
        body: "controller unavailable".to_string(),
    }
}

/// In-memory controller with one machine.
///
/// Each `get_machine` call returns the next status from the script; once the
/// script runs out the last status repeats.
pub struct FakeController {
    os_family: String,
    current_image: String,
    statuses: Vec<MachineStatus>,
    catalog: Vec<ImageCatalogEntry>,
    fail_get_on: Option<usize>,
    fail_catalog: bool,
    fail_release: bool,
    fail_deploy: bool,
    panic_deploy: bool,
    get_calls: Mutex<usize>,
    catalog_calls: Mutex<usize>,
    releases: Mutex<Vec<(SystemId, String)>>,
    deploys: Mutex<Vec<(SystemId, String)>>,
}

impl FakeController {
    pub fn new(os_family: &str, current_image: &str) -> Self {
        Self {
            os_family: os_family.to_string(),
            current_image: current_image.to_string(),
            statuses: vec![MachineStatus::Deployed, MachineStatus::Ready],
            catalog: Vec::new(),
            fail_get_on: None,
            fail_catalog: false,
            fail_release: false,
            fail_deploy: false,
            panic_deploy: false,
            get_calls: Mutex::new(0),
            catalog_calls: Mutex::new(0),
            releases: Mutex::new(Vec::new()),
            deploys: Mutex::new(Vec::new()),
        }
    }

    pub fn with_catalog(mut self, names: &[&str]) -> Self {
        self.catalog = names.iter().map(|n| ImageCatalogEntry::new(*n)).collect();
        self
    }

    pub fn with_statuses(mut self, statuses: Vec<MachineStatus>) -> Self {
        assert!(!statuses.is_empty(), "status script cannot be empty");
        self.statuses = statuses;
        self
    }

    /// Fail the `n`th `get_machine` call (1-based).
    pub fn failing_get_on(mut self, n: usize) -> Self {
        self.fail_get_on = Some(n);
        self
    }

    pub fn failing_catalog(mut self) -> Self {
        self.fail_catalog = true;
        self
    }

    pub fn failing_release(mut self) -> Self {
        self.fail_release = true;
        self
    }

    pub fn failing_deploy(mut self) -> Self {
        self.fail_deploy = true;
        self
    }

    /// Panic inside `deploy_machine`, as a bug in a controller would.
    pub fn panicking_deploy(mut self) -> Self {
        self.panic_deploy = true;
        self
    }

    pub fn get_calls(&self) -> usize {
        *self.get_calls.lock()
    }

    pub fn catalog_calls(&self) -> usize {
        *self.catalog_calls.lock()
    }

    pub fn releases(&self) -> Vec<(SystemId, String)> {
        self.releases.lock().clone()
    }

    pub fn deploys(&self) -> Vec<(SystemId, String)> {
        self.deploys.lock().clone()
    }
}

#[async_trait]
impl MachineOps for FakeController {
    async fn get_machine(&self, system_id: &SystemId) -> Result<MachineState, ControllerError> {
        let call = {
            let mut calls = self.get_calls.lock();
            *calls += 1;
            *calls
        };

        if self.fail_get_on == Some(call) {
            return Err(rejected("GET", "/machines"));
        }

        let index = (call - 1).min(self.statuses.len() - 1);
        Ok(MachineState {
            system_id: system_id.clone(),
            hostname: Some("node-01".to_string()),
            status: self.statuses[index].clone(),
            os_family: self.os_family.clone(),
            current_image: self.current_image.clone(),
        })
    }

    async fn release_machine(
        &self,
        system_id: &SystemId,
        comment: &str,
    ) -> Result<(), ControllerError> {
        self.releases
            .lock()
            .push((system_id.clone(), comment.to_string()));
        if self.fail_release {
            return Err(rejected("POST", "/op-release"));
        }
        Ok(())
    }

    async fn deploy_machine(
        &self,
        system_id: &SystemId,
        distro_series: &str,
    ) -> Result<(), ControllerError> {
        self.deploys
            .lock()
            .push((system_id.clone(), distro_series.to_string()));
        if self.panic_deploy {
            panic!("controller bug while deploying {}", system_id);
        }
        if self.fail_deploy {
            return Err(rejected("POST", "/op-deploy"));
        }
        Ok(())
    }
}

#[async_trait]
impl BootResourceOps for FakeController {
    async fn list_boot_resources(&self) -> Result<Vec<ImageCatalogEntry>, ControllerError> {
        *self.catalog_calls.lock() += 1;
        if self.fail_catalog {
            return Err(rejected("GET", "/boot-resources/"));
        }
        Ok(self.catalog.clone())
    }
}
