//! Plan writers: the line format, JSON and Mermaid Gantt charts.

use std::fmt::Write as _;
use std::io::{self, Write};

use serde_json::json;

use crate::catalog::Catalog;
use crate::plan::Plan;
use crate::policy::Policy;
use crate::stats::PlanStats;

/// Write one `index/task/start/end/priority` line per record, 1-based.
pub fn write_plan<W: Write>(plan: &Plan, mut out: W) -> io::Result<()> {
    for (idx, r) in plan.iter().enumerate() {
        writeln!(
            out,
            "{}/{}/{}/{}/{}",
            idx + 1,
            r.task,
            r.start_at,
            r.end_at,
            r.priority
        )?;
    }
    Ok(())
}

/// The [`write_plan`] output as a string.
pub fn format_plan(plan: &Plan) -> String {
    let mut buf = Vec::new();
    // Writing to a Vec cannot fail.
    let _ = write_plan(plan, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Write the policy, tasks and plan as a JSON document, with `stats` under
/// a `"stats"` key when given.
pub fn write_json<W: Write>(
    policy: Policy,
    catalog: &Catalog,
    plan: &Plan,
    stats: Option<&PlanStats>,
    mut out: W,
) -> io::Result<()> {
    let mut doc = json!({
        "policy": policy,
        "tasks": catalog.tasks(),
        "records": plan,
        "makespan": plan.makespan(),
    });
    if let Some(stats) = stats {
        doc["stats"] = serde_json::to_value(stats)?;
    }
    serde_json::to_writer_pretty(&mut out, &doc)?;
    writeln!(out)
}

/// Render the plan as a Mermaid gantt chart.
///
/// Each task gets a section with a milestone at its arrival and one bar per
/// record, labelled with the priority the record carries. Paste the result
/// into <https://mermaid.live/> to view it.
pub fn render_gantt(catalog: &Catalog, plan: &Plan) -> String {
    let mut md = String::from("gantt\ndateFormat SSS\naxisFormat %L ms\n\n");
    let mut tasks: Vec<_> = catalog.tasks().iter().collect();
    tasks.sort_by_key(|t| t.id);

    for task in tasks {
        let _ = writeln!(md, "section {}", task.id);
        let _ = writeln!(md, "{}: milestone, {:03}, 0", task.priority, task.arrive_at);
        for r in plan.iter().filter(|r| r.task == task.id) {
            let _ = writeln!(md, "{}: {:03}, {:03}", r.priority, r.start_at, r.end_at);
        }
        md.push('\n');
    }
    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::Policy;

    fn sample() -> (Catalog, Plan) {
        let catalog = Catalog::builder()
            .add_task(0, 5, 1, 2)
            .add_task(2, 3, 4, 2)
            .build();
        let plan = Policy::Fcfs.simulate(&catalog);
        (catalog, plan)
    }

    #[test]
    fn test_line_format() {
        let (_, plan) = sample();
        assert_eq!(format_plan(&plan), "1/1/0/5/1\n2/2/5/8/4\n");
        assert_eq!(format_plan(&Plan::new()), "");
    }

    #[test]
    fn test_json_document() {
        let (catalog, plan) = sample();
        let mut buf = Vec::new();
        write_json(Policy::Fcfs, &catalog, &plan, None, &mut buf).unwrap();

        let doc: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(doc["policy"], "fcfs");
        assert!(doc.get("stats").is_none());
        assert_eq!(doc["makespan"], 8);
        assert_eq!(doc["tasks"][1]["arrive_at"], 2);
        assert_eq!(doc["records"][1]["task"], 2);
        assert_eq!(doc["records"][1]["start_at"], 5);
    }

    #[test]
    fn test_json_document_with_stats() {
        let (catalog, plan) = sample();
        let stats = PlanStats::compute(&catalog, &plan);
        let mut buf = Vec::new();
        write_json(Policy::RoundRobin, &catalog, &plan, Some(&stats), &mut buf).unwrap();

        let doc: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(doc["policy"], "round-robin");
        assert_eq!(doc["stats"]["makespan"], 8);
        assert_eq!(doc["stats"]["context_switches"], 1);
        assert_eq!(doc["stats"]["tasks"][1]["waiting"], 3);
        assert_eq!(doc["stats"]["tasks"][1]["id"], 2);
    }

    #[test]
    fn test_gantt_sections() {
        let (catalog, plan) = sample();
        let md = render_gantt(&catalog, &plan);
        assert!(md.starts_with("gantt\ndateFormat SSS\n"));
        assert!(md.contains("section 1\n1: milestone, 000, 0\n1: 000, 005\n"));
        assert!(md.contains("section 2\n4: milestone, 002, 0\n4: 005, 008\n"));
    }
}
