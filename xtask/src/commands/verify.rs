//! `cargo xtask verify`: the format, lint, and test matrix.
//!
//! Profiles and stages live in `tools/automation/verify_profiles.toml`. A profile names an ordered
//! list of stages; each stage is one command line run from the workspace root. A JSON summary of
//! every run is written to `target/xtask/verify-summary.json`.

use std::collections::BTreeMap;
use std::fs;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::runtime::config::ConfigLoader;
use crate::runtime::context::CommandContext;
use crate::runtime::error::{XtaskError, XtaskResult};
use crate::XtaskCommand;

/// Profile file location relative to the workspace root.
pub const VERIFY_PROFILES_FILE: &str = "tools/automation/verify_profiles.toml";
const SUMMARY_FILE: &str = "target/xtask/verify-summary.json";

/// Parsed `verify_profiles.toml`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct VerifyProfiles {
    /// Profile used when none is named on the command line.
    pub default: String,
    /// Named stages.
    #[serde(default)]
    pub stage: BTreeMap<String, StageSpec>,
    /// Named profiles.
    #[serde(default)]
    pub profile: BTreeMap<String, ProfileSpec>,
}

/// One stage command.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct StageSpec {
    /// Banner text.
    #[serde(default)]
    pub description: Option<String>,
    /// Program followed by its arguments.
    pub command: Vec<String>,
}

/// Ordered stage list.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct ProfileSpec {
    pub stages: Vec<String>,
    /// Keep running later stages after a failure.
    #[serde(default)]
    pub keep_going: bool,
}

/// A stage ready to run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlannedStage {
    pub name: String,
    pub description: String,
    pub program: String,
    pub args: Vec<String>,
}

/// Resolved profile.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VerifyPlan {
    pub profile: String,
    pub keep_going: bool,
    pub stages: Vec<PlannedStage>,
}

impl VerifyProfiles {
    /// Resolves `requested` (or the default profile) into runnable stages.
    pub fn plan(&self, requested: Option<&str>) -> XtaskResult<VerifyPlan> {
        let name = requested.unwrap_or(&self.default);
        let profile = self.profile.get(name).ok_or_else(|| {
            XtaskError::validation(format!("unknown verify profile `{name}`")).with_hint(format!(
                "available profiles: {}",
                self.profile.keys().cloned().collect::<Vec<_>>().join(", ")
            ))
        })?;
        if profile.stages.is_empty() {
            return Err(XtaskError::config(format!(
                "verify profile `{name}` has no stages"
            )));
        }

        let stages = profile
            .stages
            .iter()
            .map(|stage_name| {
                let spec = self.stage.get(stage_name).ok_or_else(|| {
                    XtaskError::config(format!(
                        "profile `{name}` references undefined stage `{stage_name}`"
                    ))
                })?;
                let (program, args) = spec.command.split_first().ok_or_else(|| {
                    XtaskError::config(format!("stage `{stage_name}` has an empty command"))
                })?;
                Ok(PlannedStage {
                    name: stage_name.clone(),
                    description: spec
                        .description
                        .clone()
                        .unwrap_or_else(|| stage_name.clone()),
                    program: program.clone(),
                    args: args.to_vec(),
                })
            })
            .collect::<XtaskResult<Vec<_>>>()?;

        Ok(VerifyPlan {
            profile: name.to_string(),
            keep_going: profile.keep_going,
            stages,
        })
    }
}

/// Options for `cargo xtask verify`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct VerifyOptions {
    pub profile: Option<String>,
    pub list: bool,
    pub dry_run: bool,
}

/// Outcome of one executed stage.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    Passed,
    Failed,
    Skipped,
}

#[derive(Clone, Debug, Serialize)]
struct StageReport {
    name: String,
    status: StageStatus,
    duration_ms: u128,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
struct VerifySummary {
    profile: String,
    started_at: DateTime<Utc>,
    finished_at: DateTime<Utc>,
    passed: bool,
    stages: Vec<StageReport>,
}

/// `verify` command family.
pub struct VerifyCommand;

impl XtaskCommand for VerifyCommand {
    type Options = VerifyOptions;

    fn parse(args: &[String]) -> XtaskResult<Self::Options> {
        let mut options = VerifyOptions::default();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--list" => options.list = true,
                "--dry-run" => options.dry_run = true,
                "--profile" => {
                    let value = iter.next().ok_or_else(|| {
                        XtaskError::validation("`--profile` requires a profile name")
                    })?;
                    set_profile(&mut options, value)?;
                }
                flag if flag.starts_with('-') => {
                    return Err(XtaskError::validation(format!(
                        "unknown verify flag: {flag}"
                    )))
                }
                value => set_profile(&mut options, value)?,
            }
        }
        Ok(options)
    }

    fn run(ctx: &CommandContext, options: Self::Options) -> XtaskResult<()> {
        let loader = ConfigLoader::<VerifyProfiles>::new(ctx.root(), VERIFY_PROFILES_FILE);
        let profiles = loader.load()?;

        if options.list {
            for (name, profile) in &profiles.profile {
                let marker = if *name == profiles.default { " (default)" } else { "" };
                println!("{name}{marker}: {}", profile.stages.join(", "));
            }
            return Ok(());
        }

        let plan = profiles.plan(options.profile.as_deref())?;
        if options.dry_run {
            for stage in &plan.stages {
                ctx.process().announce(&stage.program, &stage.args);
            }
            return Ok(());
        }

        let summary = execute_plan(ctx, &plan);
        write_summary(ctx, &summary)?;

        let failed: Vec<_> = summary
            .stages
            .iter()
            .filter(|stage| stage.status == StageStatus::Failed)
            .map(|stage| stage.name.as_str())
            .collect();
        if failed.is_empty() {
            println!("\n==> verify `{}` passed", plan.profile);
            Ok(())
        } else {
            Err(XtaskError::process_exit(format!(
                "verify `{}` failed: {}",
                plan.profile,
                failed.join(", ")
            )))
        }
    }
}

fn set_profile(options: &mut VerifyOptions, value: &str) -> XtaskResult<()> {
    if options.profile.is_some() {
        return Err(XtaskError::validation("only one verify profile may be named"));
    }
    options.profile = Some(value.to_string());
    Ok(())
}

fn execute_plan(ctx: &CommandContext, plan: &VerifyPlan) -> VerifySummary {
    let started_at = Utc::now();
    let total = plan.stages.len();
    let mut halted = false;
    let mut stages = Vec::with_capacity(total);

    for (index, stage) in plan.stages.iter().enumerate() {
        if halted {
            stages.push(StageReport {
                name: stage.name.clone(),
                status: StageStatus::Skipped,
                duration_ms: 0,
                error: None,
            });
            continue;
        }

        println!(
            "\n==> [{}/{total}] {} ({})",
            index + 1,
            stage.description,
            chrono::Local::now().format("%H:%M:%S")
        );
        let clock = Instant::now();
        let result = ctx.process().run(ctx.root(), &stage.program, &stage.args);
        let duration_ms = clock.elapsed().as_millis();

        let (status, error) = match result {
            Ok(()) => (StageStatus::Passed, None),
            Err(err) => {
                eprintln!("stage `{}` failed: {err}", stage.name);
                halted = !plan.keep_going;
                (StageStatus::Failed, Some(err.to_string()))
            }
        };
        stages.push(StageReport {
            name: stage.name.clone(),
            status,
            duration_ms,
            error,
        });
    }

    let passed = stages
        .iter()
        .all(|stage| stage.status == StageStatus::Passed);
    VerifySummary {
        profile: plan.profile.clone(),
        started_at,
        finished_at: Utc::now(),
        passed,
        stages,
    }
}

fn write_summary(ctx: &CommandContext, summary: &VerifySummary) -> XtaskResult<()> {
    let path = ctx.root().join(SUMMARY_FILE);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|err| XtaskError::io(err.to_string()).with_path(parent))?;
    }
    let json = serde_json::to_string_pretty(summary)
        .map_err(|err| XtaskError::io(format!("cannot encode verify summary: {err}")))?;
    fs::write(&path, json).map_err(|err| XtaskError::io(err.to_string()).with_path(&path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::config::test_support::scratch_dir;
    use crate::runtime::error::ErrorCategory;

    const PROFILES: &str = r#"
default = "fast"

[stage.fmt]
description = "Formatting"
command = ["cargo", "fmt", "--all", "--", "--check"]

[stage.test]
command = ["cargo", "test", "--workspace"]

[profile.fast]
stages = ["fmt"]

[profile.full]
stages = ["fmt", "test"]
keep_going = true

[profile.broken]
stages = ["fmt", "lint"]
"#;

    fn profiles() -> VerifyProfiles {
        toml::from_str(PROFILES).expect("profiles")
    }

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn default_profile_is_used_when_none_is_named() {
        let plan = profiles().plan(None).expect("plan");
        assert_eq!(plan.profile, "fast");
        assert_eq!(
            plan.stages,
            vec![PlannedStage {
                name: "fmt".into(),
                description: "Formatting".into(),
                program: "cargo".into(),
                args: args(&["fmt", "--all", "--", "--check"]),
            }]
        );
    }

    #[test]
    fn stage_description_falls_back_to_its_name() {
        let plan = profiles().plan(Some("full")).expect("plan");
        assert!(plan.keep_going);
        assert_eq!(plan.stages[1].description, "test");
    }

    #[test]
    fn undefined_stages_and_profiles_are_rejected() {
        let err = profiles().plan(Some("broken")).expect_err("undefined stage");
        assert_eq!(err.category(), ErrorCategory::Config);
        assert!(err.to_string().contains("undefined stage `lint`"));

        let err = profiles().plan(Some("nightly")).expect_err("unknown profile");
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(err.to_string().contains("broken, fast, full"));
    }

    #[test]
    fn parse_accepts_positional_or_flag_profile() {
        assert_eq!(
            VerifyCommand::parse(&args(&["full", "--dry-run"])).expect("parse"),
            VerifyOptions {
                profile: Some("full".into()),
                list: false,
                dry_run: true,
            }
        );
        assert_eq!(
            VerifyCommand::parse(&args(&["--profile", "fast"]))
                .expect("parse")
                .profile,
            Some("fast".into())
        );
        assert!(VerifyCommand::parse(&args(&["fast", "full"])).is_err());
        assert!(VerifyCommand::parse(&args(&["--profile"])).is_err());
        assert!(VerifyCommand::parse(&args(&["--watch"])).is_err());
    }

    #[test]
    fn profiles_load_from_the_automation_directory() {
        let root = scratch_dir("verify-profiles");
        fs::create_dir_all(root.join("tools/automation")).expect("mkdir");
        fs::write(root.join(VERIFY_PROFILES_FILE), PROFILES).expect("write");
        let loaded = ConfigLoader::<VerifyProfiles>::new(&root, VERIFY_PROFILES_FILE)
            .load()
            .expect("load");
        assert_eq!(loaded, profiles());
    }

    #[test]
    fn failing_stage_halts_unless_keep_going() {
        let root = scratch_dir("verify-run");
        let ctx = CommandContext::with_root(root);
        let plan = VerifyPlan {
            profile: "adhoc".into(),
            keep_going: false,
            stages: vec![
                PlannedStage {
                    name: "missing".into(),
                    description: "missing".into(),
                    program: "xtask-definitely-missing-program".into(),
                    args: Vec::new(),
                },
                PlannedStage {
                    name: "after".into(),
                    description: "after".into(),
                    program: "xtask-definitely-missing-program".into(),
                    args: Vec::new(),
                },
            ],
        };
        let summary = execute_plan(&ctx, &plan);
        assert!(!summary.passed);
        assert_eq!(summary.stages[0].status, StageStatus::Failed);
        assert_eq!(summary.stages[1].status, StageStatus::Skipped);

        write_summary(&ctx, &summary).expect("summary");
        let written = fs::read_to_string(ctx.root().join(SUMMARY_FILE)).expect("read");
        let json: serde_json::Value = serde_json::from_str(&written).expect("json");
        assert_eq!(json["stages"][1]["status"], "skipped");
        assert_eq!(json["passed"], false);
    }
}
