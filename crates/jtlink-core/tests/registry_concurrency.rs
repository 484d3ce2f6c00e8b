use std::sync::{Arc, Barrier};
use std::thread;

use jtlink_core::app::{HandlerRegistry, RegisterOutcome};
use jtlink_core::impls::FnHandler;
use jtlink_core::{MsgHandler, MsgType};

const THREADS: u16 = 8;
const TYPES_PER_THREAD: u16 = 64;

fn handler_for(id: u16) -> Arc<dyn MsgHandler> {
    Arc::new(FnHandler::noop(format!("handler-{id:04x}"), [MsgType::new(id)]))
}

#[test]
fn concurrent_registration_of_distinct_types_loses_no_writes() {
    let registry = Arc::new(HandlerRegistry::new());
    let barrier = Arc::new(Barrier::new(usize::from(THREADS)));

    thread::scope(|scope| {
        for t in 0..THREADS {
            let registry = Arc::clone(&registry);
            let barrier = Arc::clone(&barrier);
            scope.spawn(move || {
                barrier.wait();
                for i in 0..TYPES_PER_THREAD {
                    let id = t * TYPES_PER_THREAD + i;
                    registry.register_supported(handler_for(id)).unwrap();
                }
            });
        }
    });

    let total = usize::from(THREADS * TYPES_PER_THREAD);
    assert_eq!(registry.len(), total);
    for id in 0..THREADS * TYPES_PER_THREAD {
        let handler = registry.get_handler(MsgType::new(id)).unwrap();
        assert_eq!(handler.name(), format!("handler-{id:04x}"));
    }
    assert_eq!(registry.handler_mappings().len(), total);
}

#[test]
fn concurrent_registration_of_same_type_accepts_exactly_one() {
    let registry = Arc::new(HandlerRegistry::new());
    let barrier = Arc::new(Barrier::new(usize::from(THREADS)));

    let outcomes: Vec<(String, RegisterOutcome)> = thread::scope(|scope| {
        let workers: Vec<_> = (0..THREADS)
            .map(|t| {
                let registry = Arc::clone(&registry);
                let barrier = Arc::clone(&barrier);
                scope.spawn(move || {
                    let name = format!("contender-{t}");
                    let handler: Arc<dyn MsgHandler> =
                        Arc::new(FnHandler::noop(name.clone(), [MsgType::LOCATION_UPLOAD]));
                    barrier.wait();
                    let outcome =
                        registry.try_register_handler(MsgType::LOCATION_UPLOAD, handler, false);
                    (name, outcome)
                })
            })
            .collect();
        workers.into_iter().map(|w| w.join().unwrap()).collect()
    });

    let winners: Vec<&String> = outcomes
        .iter()
        .filter(|(_, outcome)| matches!(outcome, RegisterOutcome::Inserted))
        .map(|(name, _)| name)
        .collect();
    assert_eq!(winners.len(), 1);

    let resolved = registry.get_handler(MsgType::LOCATION_UPLOAD).unwrap();
    assert_eq!(resolved.name(), winners[0].as_str());

    for (_, outcome) in &outcomes {
        if let RegisterOutcome::Skipped { existing } = outcome {
            assert!(Arc::ptr_eq(existing, &resolved));
        }
    }
}

#[test]
fn lookups_run_alongside_registration() {
    let registry = Arc::new(HandlerRegistry::new());
    registry.register(MsgType::HEARTBEAT, handler_for(MsgType::HEARTBEAT.id()));

    thread::scope(|scope| {
        let writer = Arc::clone(&registry);
        scope.spawn(move || {
            for id in 0x1000..0x1100 {
                writer.register(MsgType::new(id), handler_for(id));
            }
        });

        for _ in 0..4 {
            let reader = Arc::clone(&registry);
            scope.spawn(move || {
                for _ in 0..1_000 {
                    let heartbeat = reader.get_handler(MsgType::HEARTBEAT).unwrap();
                    assert_eq!(heartbeat.name(), "handler-0002");
                }
            });
        }
    });

    assert_eq!(registry.len(), 1 + 0x100);
}
