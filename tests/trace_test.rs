use memsim::{trace::TraceReader, Error, Policy, SimConfig, Simulator};
use std::io::Cursor;

fn run_trace(text: &str, num_frames: usize, policy: Policy) -> memsim::Result<memsim::Stats> {
    let mut sim = Simulator::new(SimConfig::new(num_frames, policy).with_seed(5))?;
    sim.run(TraceReader::new(Cursor::new(text)))
}

#[test]
fn test_lru_trace() {
    let stats = run_trace("00001000 R\n00002000 R\n00001000 R\n", 2, Policy::Lru).unwrap();

    assert_eq!(stats.events, 3);
    assert_eq!(stats.disk_reads, 2);
    assert_eq!(stats.disk_writes, 0);
}

#[test]
fn test_dirty_eviction_trace() {
    for policy in Policy::ALL {
        let stats = run_trace("00000000 W\n00001000 R\n", 1, policy).unwrap();

        assert_eq!(stats.disk_reads, 2);
        assert_eq!(stats.disk_writes, 1);
        assert_eq!(
            stats.to_string(),
            "total memory frames:  1\n\
             events in trace:      2\n\
             total disk reads:     2\n\
             total disk writes:    1\n\
             page fault rate:      1.0000"
        );
    }
}

#[test]
fn test_malformed_entry_stops_run() {
    let text = "0041f7a0 R\n13f5e2c0 R\n05e78900 Q\n004758a0 R\n";

    let mut sim = Simulator::new(SimConfig::new(4, Policy::Fifo)).unwrap();
    let result = sim.run(TraceReader::new(Cursor::new(text)));

    match result {
        Err(Error::MalformedTraceEntry { event, line, .. }) => {
            assert_eq!(event, 3);
            assert_eq!(line, 3);
        }
        other => panic!("expected a malformed entry, got {other:?}"),
    }
    assert_eq!(sim.snapshot().events, 2);
}

#[test]
fn test_invalid_utf8_stops_run() {
    let trace: &[u8] = b"0041f7a0 R\n13f5e2c0 \xff\n";

    let mut sim = Simulator::new(SimConfig::new(4, Policy::Lru)).unwrap();
    let result = sim.run(TraceReader::new(Cursor::new(trace)));

    assert!(matches!(
        result,
        Err(Error::MalformedTraceEntry { event: 2, line: 2, .. })
    ));
    assert_eq!(sim.snapshot().events, 1);
}

#[test]
fn test_empty_trace() {
    let stats = run_trace("", 3, Policy::Clock).unwrap();

    assert_eq!(stats.events, 0);
    assert_eq!(stats.fault_rate(), 0.0);
    assert!(stats.to_string().ends_with("page fault rate:      0.0000"));
}
