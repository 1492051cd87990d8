use std::{cell::RefCell, rc::Rc};

use futures::{FutureExt, channel::oneshot, executor::block_on};
use scene_ngin::flow::forward_events;

#[derive(Debug, PartialEq)]
enum Loaded {
    Font,
    Matcap,
}

#[test]
fn ready_events_are_sent_while_others_are_pending() {
    let (matcap_done, matcap_signal) = oneshot::channel::<()>();
    let font: Box<dyn Future<Output = Loaded>> = Box::new(async { Loaded::Font });
    let matcap: Box<dyn Future<Output = Loaded>> = Box::new(async move {
        let _ = matcap_signal.await;
        Loaded::Matcap
    });

    let delivered = Rc::new(RefCell::new(Vec::new()));
    let sink = delivered.clone();
    let mut forwarding = Box::pin(forward_events(vec![matcap, font], move |event| {
        sink.borrow_mut().push(event);
        true
    }));

    assert!(forwarding.as_mut().now_or_never().is_none());
    assert_eq!(*delivered.borrow(), vec![Loaded::Font]);

    matcap_done.send(()).expect("receiver alive");
    block_on(forwarding);
    assert_eq!(*delivered.borrow(), vec![Loaded::Font, Loaded::Matcap]);
}

#[test]
fn forwarding_stops_when_the_receiver_is_gone() {
    let first: Box<dyn Future<Output = Loaded>> = Box::new(async { Loaded::Font });
    let second: Box<dyn Future<Output = Loaded>> = Box::new(async { Loaded::Matcap });

    let mut calls = 0;
    block_on(forward_events(vec![first, second], |_| {
        calls += 1;
        false
    }));
    assert_eq!(calls, 1);
}

#[test]
fn no_futures_sends_nothing() {
    let mut calls = 0;
    block_on(forward_events(Vec::<Box<dyn Future<Output = Loaded>>>::new(), |_| {
        calls += 1;
        true
    }));
    assert_eq!(calls, 0);
}
