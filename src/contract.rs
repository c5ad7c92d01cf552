//! Contract Assembly
//!
//! Merges a loosely-typed field map into the services contract template.
//! Assembly is total: missing or blank fields fall back to placeholders.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::templates::{Bindings, ContractTemplate, CONTRACT_TEMPLATE};

/// Label introducing a caller-supplied termination clause.
pub const ADDITIONAL_CLAUSE_LABEL: &str = "Cláusula adicional informada pelas partes:";

const TERMINATION_BASE: &str = "1. Qualquer das partes poderá rescindir este contrato, mediante comunicação por escrito.\n\
    2. Em caso de rescisão pelo(a) CONTRATANTE, serão devidos os honorários proporcionais ao trabalho já realizado, além de despesas comprovadas.\n\
    3. Em caso de renúncia pelo(a) CONTRATADO(A), serão adotadas as providências necessárias para evitar prejuízo ao(à) CONTRATANTE, incluindo comunicação formal, entrega de documentos essenciais e orientações de transição, respeitados os prazos e deveres profissionais.\n";

/// Input fields understood by the assembler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractField {
    Contractor,
    ContractedParty,
    BarRegistration,
    Forum,
    Object,
    Fees,
    Expenses,
    Communication,
    ExtraTermination,
}

impl ContractField {
    pub const ALL: [ContractField; 9] = [
        ContractField::Contractor,
        ContractField::ContractedParty,
        ContractField::BarRegistration,
        ContractField::Forum,
        ContractField::Object,
        ContractField::Fees,
        ContractField::Expenses,
        ContractField::Communication,
        ContractField::ExtraTermination,
    ];

    /// Form key, also used as the template slot name.
    pub fn key(self) -> &'static str {
        match self {
            ContractField::Contractor => "contratante",
            ContractField::ContractedParty => "contratado",
            ContractField::BarRegistration => "oab",
            ContractField::Forum => "foro",
            ContractField::Object => "objeto",
            ContractField::Fees => "honorarios",
            ContractField::Expenses => "despesas",
            ContractField::Communication => "comunicacao",
            ContractField::ExtraTermination => "rescisao",
        }
    }

    /// Fallback text. The extra termination clause has none: it is omitted.
    pub fn placeholder(self) -> Option<&'static str> {
        match self {
            ContractField::Contractor => Some("CONTRATANTE"),
            ContractField::ContractedParty => Some("CONTRATADO(A)"),
            ContractField::BarRegistration => Some("OAB/UF XXXXX"),
            ContractField::Forum => Some("Comarca de __________________/UF"),
            ContractField::Object => {
                Some("Prestação de serviços advocatícios no tema: ____________________________.")
            }
            ContractField::Fees => Some(
                "Honorários: R$ ________ (fixo) e/ou ________% (êxito), conforme condições abaixo.",
            ),
            ContractField::Expenses => Some(
                "Custas, emolumentos e despesas correrão por conta do(a) CONTRATANTE, mediante prestação de contas.",
            ),
            ContractField::Communication => Some("WhatsApp/E-mail"),
            ContractField::ExtraTermination => None,
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }
}

/// Free-form field map, as submitted by a form or a JSON payload.
///
/// Keys outside [`ContractField`] are kept but never rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContractFields {
    values: BTreeMap<String, String>,
}

impl ContractFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: ContractField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: ContractField, value: impl Into<String>) {
        self.values.insert(field.key().to_string(), value.into());
    }

    /// Raw value as supplied, untrimmed.
    pub fn get(&self, field: ContractField) -> Option<&str> {
        self.values.get(field.key()).map(String::as_str)
    }

    /// Trimmed value, or `None` when absent or blank.
    pub fn supplied(&self, field: ContractField) -> Option<&str> {
        self.get(field).map(str::trim).filter(|v| !v.is_empty())
    }

    /// Trimmed value, else the field's placeholder, else empty.
    pub fn resolve(&self, field: ContractField) -> &str {
        self.supplied(field)
            .or_else(|| field.placeholder())
            .unwrap_or("")
    }
}

impl<K, V> FromIterator<(K, V)> for ContractFields
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Builds the termination clauses: three fixed points plus an optional
/// labelled addition.
pub fn termination_block(extra: Option<&str>) -> String {
    let mut block = TERMINATION_BASE.to_string();
    if let Some(extra) = extra.map(str::trim).filter(|e| !e.is_empty()) {
        block.push('\n');
        block.push_str(ADDITIONAL_CLAUSE_LABEL);
        block.push_str("\n- ");
        block.push_str(extra);
        block.push('\n');
    }
    block
}

/// Fills the services contract template from a field map.
#[derive(Debug, Clone, Copy)]
pub struct ContractAssembler {
    template: &'static ContractTemplate,
}

impl ContractAssembler {
    pub fn new() -> Self {
        Self { template: &CONTRACT_TEMPLATE }
    }

    pub fn template(&self) -> &'static ContractTemplate {
        self.template
    }

    pub fn bindings(&self, fields: &ContractFields) -> Bindings {
        let mut bindings: Bindings = ContractField::ALL
            .into_iter()
            .filter(|f| f.placeholder().is_some())
            .map(|f| (f.key(), fields.resolve(f).to_string()))
            .collect();
        bindings.insert(
            "clausulas_rescisao",
            termination_block(fields.supplied(ContractField::ExtraTermination)),
        );
        bindings
    }

    pub fn assemble(&self, fields: &ContractFields) -> String {
        let bindings = self.bindings(fields);
        let text = self.template.render(&bindings);
        debug!(
            template = self.template.id,
            version = self.template.version,
            supplied = ContractField::ALL.iter().filter(|f| fields.supplied(**f).is_some()).count(),
            chars = text.chars().count(),
            "assembled contract"
        );
        text
    }
}

impl Default for ContractAssembler {
    fn default() -> Self {
        Self::new()
    }
}

/// Assemble the services contract with the default template.
pub fn assemble(fields: &ContractFields) -> String {
    ContractAssembler::new().assemble(fields)
}
