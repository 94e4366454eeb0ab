//! Graph execution tests

use deck_graph::prelude::*;
use proptest::prelude::*;
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Phase {
    Work,
    Check,
    Done,
}

#[derive(Debug)]
struct Job {
    phase: Phase,
    attempts: u32,
    passes_on: u32,
}

impl Job {
    fn new(passes_on: u32) -> Self {
        Self { phase: Phase::Work, attempts: 0, passes_on }
    }
}

struct WorkNode;

#[async_trait]
impl Node<Job> for WorkNode {
    fn name(&self) -> &str {
        "work"
    }

    async fn execute(&self, job: &mut Job, _ctx: &NodeContext) -> Result<()> {
        job.attempts += 1;
        job.phase = Phase::Check;
        Ok(())
    }
}

struct CheckNode;

#[async_trait]
impl Node<Job> for CheckNode {
    fn name(&self) -> &str {
        "check"
    }

    async fn execute(&self, job: &mut Job, _ctx: &NodeContext) -> Result<()> {
        job.phase = if job.attempts >= job.passes_on { Phase::Done } else { Phase::Work };
        Ok(())
    }
}

fn job_graph() -> CompiledGraph<Job> {
    StateGraph::new()
        .add_node(WorkNode)
        .add_node(CheckNode)
        .add_edge(START, "work")
        .add_conditional_edges(
            "work",
            |job: &Job| job.phase,
            [(Phase::Check, "check"), (Phase::Done, END)],
        )
        .add_conditional_edges(
            "check",
            |job: &Job| job.phase,
            [(Phase::Work, "work"), (Phase::Done, END)],
        )
        .compile()
        .unwrap()
}

#[tokio::test]
async fn test_phase_routed_loop() {
    let graph = job_graph();
    let mut job = Job::new(3);

    let summary = graph.invoke(&mut job, ExecutionConfig::new("loop")).await.unwrap();

    assert_eq!(job.attempts, 3);
    assert_eq!(job.phase, Phase::Done);
    assert_eq!(summary.steps, 6);
    assert_eq!(summary.visited, vec!["work", "check", "work", "check", "work", "check"]);
}

#[tokio::test]
async fn test_observer_receives_lifecycle_events() {
    let graph = job_graph();
    let mut job = Job::new(1);
    let seen = Mutex::new(Vec::new());

    graph
        .invoke_observed(&mut job, ExecutionConfig::new("observed"), |event| {
            seen.lock().unwrap().push(event)
        })
        .await
        .unwrap();

    let events = seen.into_inner().unwrap();
    assert_eq!(events.first(), Some(&StreamEvent::node_start("work", 0)));
    assert!(matches!(events[1], StreamEvent::NodeEnd { ref node, step: 0, .. } if node == "work"));
    assert_eq!(events.last(), Some(&StreamEvent::done(2)));
}

#[tokio::test]
async fn test_limit_reported_to_observer() {
    let graph = job_graph();
    let mut job = Job::new(u32::MAX);
    let seen = Mutex::new(Vec::new());

    let result = graph
        .invoke_observed(&mut job, ExecutionConfig::new("capped").with_recursion_limit(5), |e| {
            seen.lock().unwrap().push(e)
        })
        .await;

    assert!(matches!(result, Err(GraphError::RecursionLimitExceeded(5))));
    assert_eq!(seen.into_inner().unwrap().last(), Some(&StreamEvent::RecursionLimit { step: 5 }));
    assert_eq!(job.attempts, 3);
}

#[tokio::test]
async fn test_unknown_route_surfaces_error() {
    let graph = StateGraph::<Job>::new()
        .add_node(WorkNode)
        .add_edge(START, "work")
        .add_conditional_edges("work", |job: &Job| job.phase, [(Phase::Done, END)])
        .compile()
        .unwrap();

    let mut job = Job::new(1);
    let result = graph.invoke(&mut job, ExecutionConfig::default()).await;

    assert!(matches!(result, Err(GraphError::UnknownRouteTarget(key)) if key == "Check"));
}

proptest! {
    #[test]
    fn prop_run_never_exceeds_limit(passes_on in 0u32..40, limit in 1usize..30) {
        let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let graph = job_graph();
        let mut job = Job::new(passes_on);

        let result = rt.block_on(
            graph.invoke(&mut job, ExecutionConfig::new("prop").with_recursion_limit(limit)),
        );

        match result {
            Ok(summary) => prop_assert!(summary.steps <= limit),
            Err(GraphError::RecursionLimitExceeded(step)) => prop_assert_eq!(step, limit),
            Err(other) => prop_assert!(false, "unexpected error: {other}"),
        }
    }
}
