#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const DMN_NS: &str = "http://www.omg.org/spec/DMN/20180521/MODEL/";

pub const BDT: &str = r#"<dmn:definitions xmlns:dmn="http://www.omg.org/spec/DMN/20180521/MODEL/" name="BDT" namespace="https://example.org/bdt">
  <dmn:itemDefinition name="tPerson">
    <dmn:itemComponent name="id"><dmn:typeRef>string</dmn:typeRef></dmn:itemComponent>
    <dmn:itemComponent name="dateOfBirth"><dmn:typeRef>date</dmn:typeRef></dmn:itemComponent>
    <dmn:itemComponent name="isBlindOrDisabled"><dmn:typeRef>boolean</dmn:typeRef></dmn:itemComponent>
    <dmn:itemComponent name="citizenshipStatus"><dmn:typeRef>string</dmn:typeRef></dmn:itemComponent>
    <dmn:itemComponent name="incomeSources" isCollection="true"><dmn:typeRef>tIncomeSource</dmn:typeRef></dmn:itemComponent>
  </dmn:itemDefinition>
  <dmn:itemDefinition name="tIncomeSource">
    <dmn:itemComponent name="type"><dmn:typeRef>string</dmn:typeRef></dmn:itemComponent>
    <dmn:itemComponent name="monthlyAmount"><dmn:typeRef>number</dmn:typeRef></dmn:itemComponent>
  </dmn:itemDefinition>
  <dmn:itemDefinition name="tSituation">
    <dmn:itemComponent name="primaryPersonId"><dmn:typeRef>string</dmn:typeRef></dmn:itemComponent>
    <dmn:itemComponent name="evaluationDate"><dmn:typeRef>date</dmn:typeRef></dmn:itemComponent>
    <dmn:itemComponent name="residenceState"><dmn:typeRef>string</dmn:typeRef></dmn:itemComponent>
    <dmn:itemComponent name="people" isCollection="true"><dmn:typeRef>tPerson</dmn:typeRef></dmn:itemComponent>
  </dmn:itemDefinition>
</dmn:definitions>"#;

/// A decision document with one literal-expression decision per entry.
pub fn dmn_model(name: &str, imports: &[&str], expressions: &[&str]) -> String {
    let imports: String = imports
        .iter()
        .map(|l| format!(r#"  <dmn:import locationURI="{l}" importType="{DMN_NS}"/>"#))
        .collect::<Vec<_>>()
        .join("\n");
    let decisions: String = expressions
        .iter()
        .enumerate()
        .map(|(i, e)| {
            format!(
                r#"  <dmn:decision id="d{i}" name="decision{i}">
    <dmn:literalExpression><dmn:text>{e}</dmn:text></dmn:literalExpression>
  </dmn:decision>"#
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<dmn:definitions xmlns:dmn="{DMN_NS}" name="{name}" namespace="https://example.org/{name}">
{imports}
  <dmn:inputData name="situation"/>
{decisions}
</dmn:definitions>
"#
    )
}

pub const SSI_EXPRESSIONS: &[&str] = &[
    "situation.people[id = situation.primaryPersonId].isBlindOrDisabled",
    "sum(situation.people[id = situation.primaryPersonId].incomeSources[].monthlyAmount) &lt; 943",
    r#"situation.residenceState = "PA""#,
];

pub const CHECK_EXPRESSIONS: &[&str] = &[
    "years and months duration(person.dateOfBirth, situation.evaluationDate).years &gt;= 65",
    r#"person.citizenshipStatus in ["US_CITIZEN", "QUALIFIED_ALIEN"]"#,
];

/// Resources tree shaped like a benefits repository:
///
/// ```text
/// src/main/resources/BDT.dmn
/// src/main/resources/checks/Checks.dmn          imports "BDT.dmn" (fallback)
/// src/main/resources/benefits/federal/ssi.dmn   imports "../../BDT.dmn", "Checks.dmn" (fallback)
/// ```
pub struct BenefitTree {
    pub tmp: TempDir,
    pub resources: PathBuf,
    pub benefit: PathBuf,
}

impl BenefitTree {
    pub fn new() -> Self {
        Self::with_extra_expressions(&[])
    }

    pub fn with_extra_expressions(extra: &[&str]) -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let resources = tmp.path().join("src/main/resources");
        write(&resources.join("BDT.dmn"), BDT);
        write(
            &resources.join("checks/Checks.dmn"),
            &dmn_model("Checks", &["BDT.dmn"], CHECK_EXPRESSIONS),
        );
        let mut exprs: Vec<&str> = SSI_EXPRESSIONS.to_vec();
        exprs.extend_from_slice(extra);
        let benefit = resources.join("benefits/federal/ssi.dmn");
        write(
            &benefit,
            &dmn_model("SsiEligibility", &["../../BDT.dmn", "Checks.dmn"], &exprs),
        );
        Self {
            tmp,
            resources,
            benefit,
        }
    }

    pub fn path(&self) -> &Path {
        self.tmp.path()
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("benefit-inputs");
        cmd.current_dir(self.tmp.path()).env_remove("RUST_LOG");
        cmd
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn read_json(&self, rel: &str) -> Value {
        let raw = fs::read_to_string(self.tmp.path().join(rel)).expect("read artifact");
        serde_json::from_str(&raw).expect("artifact is json")
    }

    pub fn benefit_arg(&self) -> &str {
        self.benefit.to_str().expect("utf-8 temp path")
    }
}

pub fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().expect("parent dir")).expect("create dirs");
    fs::write(path, contents).expect("write fixture");
}
