use std::sync::atomic::{AtomicU32, Ordering};

use rusty_emitter::{Callback, Emitter, Listener, Receiver};

#[derive(Listener)]
struct Worker {
    name: &'static str,
    total: AtomicU32,
}

impl Worker {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            total: AtomicU32::new(0),
        }
    }

    fn on_tick(&self, n: &u32) {
        let total = self.total.fetch_add(*n, Ordering::Relaxed) + n;
        println!("{} ticked by {n}, total {total}", self.name);
    }

    fn close(&self) -> u32 {
        println!("{} closing", self.name);
        self.total.load(Ordering::Relaxed)
    }
}

fn main() -> Result<(), rusty_emitter::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();

    println!("=============================================================");
    println!("Worker ticks");
    println!("=============================================================");

    let emitter = Emitter::<u32>::new();
    emitter.listener::<Worker>();

    emitter.on("tick", Callback::method(Worker::on_tick));
    emitter.on(
        "tick",
        Callback::associated::<Worker, _, _>(|n: &u32| println!("all workers ticked by {n}")),
    );

    let w1 = emitter.spawn(Worker::new("w1"))?;
    let w2 = emitter.spawn(Worker::new("w2"))?;

    emitter.emit("tick", &5)?;
    emitter.emit_to("tick", &[w1.clone() as Receiver], &2)?;

    let close = emitter.finalizer(Worker::close);
    println!("w1 closed with total {}", close(&w1));
    close(&w1);

    emitter.emit("tick", &1)?;
    println!("w2 total {}", w2.total.load(Ordering::Relaxed));

    rusty_emitter::set_log_level(log::LevelFilter::Off);
    emitter.emit("unheard", &0)?;

    Ok(())
}
