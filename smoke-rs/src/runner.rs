//! Smoke-test runner
//!
//! Executes the test groups in a fixed order against a live deployment and
//! records every assertion into the [`TestReport`]. A failing assertion
//! never aborts the run; a group whose prerequisite resource id was not
//! captured degrades to a printed skip notice instead of recording
//! failures.

use crate::client::ApiClient;
use crate::config::HarnessConfig;
use crate::errors::{Result, SmokeError};
use crate::lifecycle::{approval_chain, skip_targets, ContractStatus};
use crate::model::{
    Blueprint, BlueprintUpdate, Contract, ContractFilter, ContractUpdate, Field, FieldSpec,
    FieldType, NewBlueprint, NewContract, Position, TransitionRequest,
};
use crate::report::{Category, TestReport};
use colored::Colorize;
use serde_json::{json, Map, Value};

/// A well-formed id no server resource will ever carry.
const ABSENT_ID: &str = "00000000-0000-0000-0000-000000000000";

/// Runs the smoke-test groups and owns the captured resource ids.
pub struct SmokeRunner {
    client: ApiClient,
    report: TestReport,
    blueprint_id: Option<String>,
    contract_id: Option<String>,
}

impl SmokeRunner {
    /// Build a runner against the configured base URL.
    pub fn new(config: &HarnessConfig) -> Result<Self> {
        Ok(Self {
            client: ApiClient::new(config)?,
            report: TestReport::new(),
            blueprint_id: None,
            contract_id: None,
        })
    }

    /// Ledger of all outcomes so far.
    pub fn report(&self) -> &TestReport {
        &self.report
    }

    /// Blueprint id captured by the blueprint CRUD group, if any.
    pub fn blueprint_id(&self) -> Option<&str> {
        self.blueprint_id.as_deref()
    }

    /// Contract id captured by the contract CRUD group, if any.
    pub fn contract_id(&self) -> Option<&str> {
        self.contract_id.as_deref()
    }

    /// Run every group in order, print the summary, and report success.
    pub async fn run_all(&mut self) -> bool {
        self.blueprint_crud().await;
        self.contract_crud().await;
        self.lifecycle_transitions().await;
        self.blueprint_protection().await;
        self.contract_deletion().await;
        self.stats_api().await;
        self.report.print_summary()
    }

    /// Record one assertion outcome, passing any carried value through.
    fn note<T>(&mut self, category: Category, test: &str, outcome: Result<T>) -> Option<T> {
        match outcome {
            Ok(value) => {
                self.report.record(category, test, Ok(()));
                Some(value)
            }
            Err(err) => {
                self.report.record(category, test, Err(err.to_string()));
                None
            }
        }
    }

    fn skip(reason: &str) {
        println!("{} {}", "⚠".yellow(), reason);
    }

    // ===== GROUP 1: BLUEPRINT CRUD =====

    pub async fn blueprint_crud(&mut self) {
        println!("\n=== Testing Blueprint CRUD APIs ===");

        let created = self.create_blueprint_step().await;
        self.blueprint_id = self.note(Category::BlueprintCrud, "Create Blueprint", created);

        let listed = self.list_blueprints_step().await;
        self.note(Category::BlueprintCrud, "List Blueprints", listed);

        if let Some(id) = self.blueprint_id.clone() {
            let fetched = self.get_blueprint_step(&id).await;
            self.note(Category::BlueprintCrud, "Get Single Blueprint", fetched);
        }

        let missing = self.get_missing_blueprint_step().await;
        self.note(Category::BlueprintCrud, "Get Missing Blueprint", missing);

        if let Some(id) = self.blueprint_id.clone() {
            let updated = self.update_blueprint_step(&id).await;
            self.note(Category::BlueprintCrud, "Update Blueprint (no contracts)", updated);
        }
    }

    async fn create_blueprint_step(&self) -> Result<String> {
        let response = self.client.create_blueprint(&employment_blueprint()).await?;
        response.expect_status(201)?.id()
    }

    async fn list_blueprints_step(&self) -> Result<()> {
        let response = self.client.list_blueprints().await?.expect_status(200)?;
        response.require_array()?;
        Ok(())
    }

    async fn get_blueprint_step(&self, id: &str) -> Result<()> {
        let response = self.client.get_blueprint(id).await?.expect_status(200)?;
        let echoed = response.id()?;
        if echoed != id {
            return Err(SmokeError::Mismatch(format!(
                "blueprint id echo: expected {}, got {}",
                id, echoed
            )));
        }
        Ok(())
    }

    async fn get_missing_blueprint_step(&self) -> Result<()> {
        self.client
            .get_blueprint(ABSENT_ID)
            .await?
            .expect_status(404)?;
        Ok(())
    }

    async fn update_blueprint_step(&self, id: &str) -> Result<()> {
        let payload = BlueprintUpdate {
            name: Some("Updated Employment Contract Template".to_string()),
            description: Some("Updated description".to_string()),
        };
        self.client
            .update_blueprint(id, &payload)
            .await?
            .expect_status(200)?;
        Ok(())
    }

    // ===== GROUP 2: CONTRACT CRUD =====

    pub async fn contract_crud(&mut self) {
        println!("\n=== Testing Contract CRUD APIs ===");
        let Some(blueprint_id) = self.blueprint_id.clone() else {
            Self::skip("Cannot test contracts without a blueprint id");
            return;
        };

        let created = self.create_contract_step(&blueprint_id).await;
        self.contract_id = self.note(Category::ContractCrud, "Create Contract", created);

        let listed = self.list_contracts_step().await;
        self.note(Category::ContractCrud, "List Contracts", listed);

        let by_status = self
            .filtered_list_step(ContractFilter::by_status(ContractStatus::Created))
            .await;
        self.note(Category::ContractCrud, "List Contracts (status filter)", by_status);

        let by_category = self.filtered_list_step(ContractFilter::by_category("pending")).await;
        self.note(Category::ContractCrud, "List Contracts (category filter)", by_category);

        let by_blueprint = self.blueprint_filter_step(&blueprint_id).await;
        self.note(Category::ContractCrud, "List Contracts (blueprint filter)", by_blueprint);

        if let Some(contract_id) = self.contract_id.clone() {
            let fetched = self.get_contract_step(&contract_id).await;
            self.note(Category::ContractCrud, "Get Single Contract", fetched);

            let updated = self.update_contract_fields_step(&contract_id).await;
            self.note(Category::ContractCrud, "Update Contract Fields", updated);
        }
    }

    async fn create_contract_step(&self, blueprint_id: &str) -> Result<String> {
        // Field values are keyed by the server-assigned field ids, so the
        // blueprint has to be re-read first.
        let blueprint: Blueprint = self
            .client
            .get_blueprint(blueprint_id)
            .await?
            .expect_status(200)?
            .decode()?;

        let payload = NewContract {
            name: "John Doe Employment Contract".to_string(),
            blueprint_id: blueprint_id.to_string(),
            field_values: Some(initial_field_values(&blueprint.fields)),
        };
        self.client.create_contract(&payload).await?.expect_status(201)?.id()
    }

    async fn list_contracts_step(&self) -> Result<()> {
        let response = self
            .client
            .list_contracts(&ContractFilter::default())
            .await?
            .expect_status(200)?;
        response.require_array()?;
        Ok(())
    }

    async fn filtered_list_step(&self, filter: ContractFilter) -> Result<()> {
        self.client.list_contracts(&filter).await?.expect_status(200)?;
        Ok(())
    }

    async fn blueprint_filter_step(&self, blueprint_id: &str) -> Result<()> {
        let response = self
            .client
            .list_contracts(&ContractFilter::by_blueprint(blueprint_id))
            .await?
            .expect_status(200)?;
        for row in response.require_array()? {
            if row.get("blueprintId").and_then(Value::as_str) != Some(blueprint_id) {
                return Err(SmokeError::Mismatch(
                    "blueprint filter returned a contract of another blueprint".to_string(),
                ));
            }
        }
        Ok(())
    }

    async fn get_contract_step(&self, id: &str) -> Result<()> {
        let response = self.client.get_contract(id).await?.expect_status(200)?;
        let echoed = response.id()?;
        if echoed != id {
            return Err(SmokeError::Mismatch(format!(
                "contract id echo: expected {}, got {}",
                id, echoed
            )));
        }
        Ok(())
    }

    async fn update_contract_fields_step(&self, id: &str) -> Result<()> {
        let contract: Contract = self
            .client
            .get_contract(id)
            .await?
            .expect_status(200)?
            .decode()?;

        let payload = ContractUpdate {
            name: None,
            field_values: Some(updated_field_values(&contract.fields)),
        };
        self.client.update_contract(id, &payload).await?.expect_status(200)?;
        Ok(())
    }

    // ===== GROUP 3: LIFECYCLE TRANSITIONS =====

    pub async fn lifecycle_transitions(&mut self) {
        println!("\n=== Testing Contract Lifecycle Transitions ===");
        let Some(contract_id) = self.contract_id.clone() else {
            Self::skip("Cannot test transitions without a contract id");
            return;
        };

        let mut current = ContractStatus::Created;
        for (from, to, note) in approval_chain() {
            let outcome = self.transition_step(&contract_id, to, note).await;
            let name = format!("Transition {} → {}", from, to);
            if self.note(Category::LifecycleTransitions, &name, outcome).is_some() {
                current = to;
            }
        }

        self.invalid_transitions().await;

        if current == ContractStatus::Locked {
            let history = self.status_history_step(&contract_id).await;
            self.note(Category::LifecycleTransitions, "Status History Recorded", history);

            let immutable = self.locked_immutability_step(&contract_id).await;
            self.note(
                Category::LifecycleTransitions,
                "Locked Contract Immutability",
                immutable,
            );
        }
    }

    async fn transition_step(&self, id: &str, to: ContractStatus, note: &str) -> Result<()> {
        let request = TransitionRequest::to_status(to, note);
        let response = self
            .client
            .transition_contract(id, &request)
            .await?
            .expect_status(200)?;

        let echoed = response
            .body
            .get("status")
            .and_then(Value::as_str)
            .ok_or_else(|| SmokeError::MissingField("status".to_string()))?;
        if echoed != to.as_str() {
            return Err(SmokeError::Mismatch(format!(
                "transition echoed status {}, expected {}",
                echoed, to
            )));
        }
        Ok(())
    }

    /// Rejection probes against a fresh contract still in `created`.
    async fn invalid_transitions(&mut self) {
        let setup = self.create_probe_contract().await;
        match setup {
            Ok(Some(probe_id)) => {
                for target in skip_targets() {
                    let outcome = self
                        .rejected_transition_step(&probe_id, target.as_str().to_string())
                        .await;
                    let name = format!("Invalid Transition created → {} (expected fail)", target);
                    self.note(Category::LifecycleTransitions, &name, outcome);
                }

                let unknown = self
                    .rejected_transition_step(&probe_id, "archived".to_string())
                    .await;
                self.note(Category::LifecycleTransitions, "Unknown Status Rejected", unknown);
            }
            Ok(None) => {
                Self::skip("Second contract was refused; skipping invalid-transition checks");
            }
            Err(err) => {
                self.report.record(
                    Category::LifecycleTransitions,
                    "Setup for Invalid Transitions",
                    Err(err.to_string()),
                );
            }
        }
    }

    async fn create_probe_contract(&self) -> Result<Option<String>> {
        let Some(blueprint_id) = &self.blueprint_id else {
            return Ok(None);
        };
        let payload = NewContract {
            name: "Contract for Invalid Transitions".to_string(),
            blueprint_id: blueprint_id.clone(),
            field_values: None,
        };
        let response = self.client.create_contract(&payload).await?;
        if response.status != 201 {
            return Ok(None);
        }
        Ok(Some(response.id()?))
    }

    async fn rejected_transition_step(&self, id: &str, new_status: String) -> Result<()> {
        let request = TransitionRequest {
            new_status,
            note: "Should fail".to_string(),
        };
        self.client
            .transition_contract(id, &request)
            .await?
            .expect_status(400)?;
        Ok(())
    }

    async fn status_history_step(&self, id: &str) -> Result<()> {
        let contract: Contract = self
            .client
            .get_contract(id)
            .await?
            .expect_status(200)?
            .decode()?;

        if contract.status != ContractStatus::Locked {
            return Err(SmokeError::Mismatch(format!(
                "contract settled in {}, expected locked",
                contract.status
            )));
        }
        // Creation plus one entry per chain transition.
        let entries = contract.status_history.len();
        if entries < 5 {
            return Err(SmokeError::Mismatch(format!(
                "status history has {} entries, expected at least 5",
                entries
            )));
        }
        Ok(())
    }

    async fn locked_immutability_step(&self, id: &str) -> Result<()> {
        let payload = ContractUpdate {
            name: Some("Should not be allowed".to_string()),
            field_values: None,
        };
        self.client.update_contract(id, &payload).await?.expect_status(400)?;
        Ok(())
    }

    // ===== GROUP 4: BLUEPRINT PROTECTION =====

    pub async fn blueprint_protection(&mut self) {
        println!("\n=== Testing Blueprint Protection ===");
        let Some(blueprint_id) = self.blueprint_id.clone() else {
            Self::skip("Cannot test blueprint protection without a blueprint id");
            return;
        };

        let update = self.protected_update_step(&blueprint_id).await;
        self.note(
            Category::BlueprintCrud,
            "Update Blueprint (with contracts - should fail)",
            update,
        );

        let delete = self.protected_delete_step(&blueprint_id).await;
        self.note(
            Category::BlueprintCrud,
            "Delete Blueprint (with contracts - should fail)",
            delete,
        );
    }

    async fn protected_update_step(&self, id: &str) -> Result<()> {
        let payload = BlueprintUpdate {
            name: Some("Should not be allowed to update".to_string()),
            description: Some("This should fail".to_string()),
        };
        self.client.update_blueprint(id, &payload).await?.expect_status(400)?;
        Ok(())
    }

    async fn protected_delete_step(&self, id: &str) -> Result<()> {
        self.client.delete_blueprint(id).await?.expect_status(400)?;
        Ok(())
    }

    // ===== GROUP 5: CONTRACT DELETION =====

    pub async fn contract_deletion(&mut self) {
        println!("\n=== Testing Contract Deletion ===");
        let Some(blueprint_id) = self.blueprint_id.clone() else {
            Self::skip("Cannot test contract deletion without a blueprint id");
            return;
        };

        let throwaway = self.delete_fresh_contract_step(&blueprint_id).await;
        self.note(Category::ContractCrud, "Delete Contract (created status)", throwaway);

        if let Some(contract_id) = self.contract_id.clone() {
            let refused = self.delete_advanced_contract_step(&contract_id).await;
            self.note(
                Category::ContractCrud,
                "Delete Contract (non-created status - should fail)",
                refused,
            );
        }
    }

    async fn delete_fresh_contract_step(&self, blueprint_id: &str) -> Result<()> {
        let payload = NewContract {
            name: "Contract for Deletion Test".to_string(),
            blueprint_id: blueprint_id.to_string(),
            field_values: None,
        };
        let id = self.client.create_contract(&payload).await?.expect_status(201)?.id()?;
        self.client.delete_contract(&id).await?.expect_status(200)?;
        Ok(())
    }

    async fn delete_advanced_contract_step(&self, id: &str) -> Result<()> {
        self.client.delete_contract(id).await?.expect_status(400)?;
        Ok(())
    }

    // ===== GROUP 6: STATS API =====

    pub async fn stats_api(&mut self) {
        println!("\n=== Testing Stats API ===");

        let keys = self.stats_keys_step().await;
        self.note(Category::StatsApi, "Get Dashboard Stats", keys);

        let coverage = self.stats_coverage_step().await;
        self.note(Category::StatsApi, "Stats Status Coverage", coverage);
    }

    async fn stats_keys_step(&self) -> Result<()> {
        let response = self.client.stats().await?.expect_status(200)?;
        let missing: Vec<&str> = ["totalContracts", "totalBlueprints", "byStatus", "byCategory"]
            .into_iter()
            .filter(|key| response.body.get(key).is_none())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(SmokeError::MissingField(missing.join(", ")))
        }
    }

    async fn stats_coverage_step(&self) -> Result<()> {
        let stats: crate::model::Stats = self.client.stats().await?.expect_status(200)?.decode()?;
        for status in ContractStatus::ALL {
            if !stats.by_status.contains_key(status.as_str()) {
                return Err(SmokeError::MissingField(format!("byStatus.{}", status)));
            }
        }
        Ok(())
    }
}

/// The blueprint every run creates: one field of each supported type.
fn employment_blueprint() -> NewBlueprint {
    NewBlueprint {
        name: "Employment Contract Template".to_string(),
        description: "Standard employment contract with signature fields".to_string(),
        fields: vec![
            FieldSpec {
                field_type: FieldType::Text,
                label: "Employee Name".to_string(),
                required: true,
                position: Position { x: 0, y: 0 },
            },
            FieldSpec {
                field_type: FieldType::Date,
                label: "Start Date".to_string(),
                required: true,
                position: Position { x: 0, y: 60 },
            },
            FieldSpec {
                field_type: FieldType::Signature,
                label: "Employee Signature".to_string(),
                required: true,
                position: Position { x: 0, y: 120 },
            },
            FieldSpec {
                field_type: FieldType::Checkbox,
                label: "Agrees to Terms".to_string(),
                required: true,
                position: Position { x: 0, y: 180 },
            },
        ],
    }
}

/// Initial contract values, one per field, chosen by field type.
fn initial_field_values(fields: &[Field]) -> Map<String, Value> {
    let mut values = Map::new();
    for field in fields {
        let value = match field.field_type {
            FieldType::Text => json!("John Doe"),
            FieldType::Date => json!("2024-01-15"),
            FieldType::Checkbox => json!(true),
            FieldType::Signature => json!("John Doe Signature"),
        };
        values.insert(field.id.clone(), value);
    }
    values
}

/// Second-pass values: only text fields are rewritten.
fn updated_field_values(fields: &[Field]) -> Map<String, Value> {
    fields
        .iter()
        .filter(|field| field.field_type == FieldType::Text)
        .map(|field| (field.id.clone(), json!("Jane Doe Updated")))
        .collect()
}
