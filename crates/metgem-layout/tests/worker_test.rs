use crossbeam_channel::{Receiver, Sender, bounded};
use metgem_graph::Graph;
use metgem_layout::{ForceKernel, KernelError, LayoutOptions, LayoutWorker, Point};
use metgem_worker::{Outcome, WorkerSet, spawn, spawn_in};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn two_cluster_graph() -> Graph {
    let mut g = Graph::new();
    g.add_vertices(4);
    g.add_weighted_edge(0, 1, 0.9).unwrap();
    g.add_weighted_edge(1, 2, 0.8).unwrap();
    g
}

#[test]
fn layout_worker_streams_progress_and_finishes() {
    let worker = LayoutWorker::new(
        two_cluster_graph(),
        LayoutOptions {
            iterations: 50,
            ..LayoutOptions::default()
        },
    );
    let handle = spawn(worker);
    let outcome = handle.join().unwrap();
    let layout = match outcome {
        Outcome::Finished(layout) => layout,
        Outcome::Cancelled => panic!("run was not cancelled"),
    };
    assert_eq!(layout.len(), 4);
}

/// Kernel that hands control to the test while "simulating": it signals entry,
/// then blocks until released. Lets the test raise the stop flag while the run
/// sits inside a component, proving cancellation lands at the next boundary.
#[derive(Debug)]
struct GatedKernel {
    entered: Sender<()>,
    release: Receiver<()>,
}

impl ForceKernel for GatedKernel {
    fn simulate(
        &self,
        graph: &Graph,
        _iterations: u32,
        _scaling_ratio: f64,
        _node_size: f64,
    ) -> Result<Vec<Point>, KernelError> {
        let _ = self.entered.send(());
        let _ = self.release.recv();
        Ok(vec![Point::ZERO; graph.vertex_count()])
    }
}

#[test]
fn cancellation_takes_effect_at_the_next_component_boundary() {
    let (entered_tx, entered_rx) = bounded(1);
    let (release_tx, release_rx) = bounded(1);
    let worker = LayoutWorker::with_kernel(
        two_cluster_graph(),
        LayoutOptions::default(),
        GatedKernel {
            entered: entered_tx,
            release: release_rx,
        },
    );

    let handle = spawn(worker);
    entered_rx.recv().unwrap();
    handle.stop();
    release_tx.send(()).unwrap();

    let outcome = handle.join().unwrap();
    assert!(outcome.is_cancelled());
}

#[test]
fn worker_set_observes_layout_worker_lifetime() {
    let set = WorkerSet::new();
    let busy = Arc::new(AtomicUsize::new(0));
    let idle = Arc::new(AtomicUsize::new(0));
    {
        let busy = Arc::clone(&busy);
        set.on_busy(move || {
            busy.fetch_add(1, Ordering::SeqCst);
        });
    }
    {
        let idle = Arc::clone(&idle);
        set.on_idle(move || {
            idle.fetch_add(1, Ordering::SeqCst);
        });
    }

    let worker = LayoutWorker::new(
        two_cluster_graph(),
        LayoutOptions {
            iterations: 20,
            ..LayoutOptions::default()
        },
    );
    let handle = spawn_in(&set, worker);
    assert_eq!(busy.load(Ordering::SeqCst), 1);
    handle.join().unwrap();
    assert!(set.is_idle());
    assert_eq!(idle.load(Ordering::SeqCst), 1);
}
