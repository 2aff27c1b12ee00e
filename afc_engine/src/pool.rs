/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

//! the channel-level parallel unit of spec §5: each channel's EIRP ceiling
//! is independent of every other, so a run chunks the channel list across
//! `std::thread::available_parallelism()` scoped threads and joins. No
//! actor/message-passing framework and no work-stealing library — a plain
//! chunked `for` + `join`, matching the teacher's explicit-control-flow
//! style in its non-actor crates.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// a monotone cancel flag checked at task (here: chunk) boundaries. Once
/// set it never clears; a run that observes it stops contributing further
/// results and reports `Cancelled`.
#[derive(Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        CancelFlag(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// number of worker threads to chunk across; never fewer than one even on
/// a single-core host.
pub fn worker_count() -> usize {
    std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
}

/// applies `f` to every item in `items`, split into `worker_count()` (or
/// fewer, if `items` is short) contiguous chunks each run on its own
/// scoped thread, preserving input order in the returned vector. `f` is
/// expected to check `cancel` itself for any long-running inner loop;
/// this function only skips chunks that haven't started yet once
/// cancellation is observed, leaving their slots as `None`.
pub fn parallel_map_chunked<T, R, F>(items: &[T], cancel: &CancelFlag, f: F) -> Vec<Option<R>>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync,
{
    if items.is_empty() {
        return Vec::new();
    }
    let workers = worker_count().min(items.len()).max(1);
    let chunk_len = items.len().div_ceil(workers);

    let mut results: Vec<Option<R>> = (0..items.len()).map(|_| None).collect();
    let chunks: Vec<&mut [Option<R>]> = results.chunks_mut(chunk_len).collect();
    let item_chunks: Vec<&[T]> = items.chunks(chunk_len).collect();

    std::thread::scope(|scope| {
        let mut handles = Vec::with_capacity(chunks.len());
        for (out_chunk, in_chunk) in chunks.into_iter().zip(item_chunks.into_iter()) {
            let f = &f;
            let cancel = cancel.clone();
            handles.push(scope.spawn(move || {
                if cancel.is_cancelled() {
                    return;
                }
                for (out, item) in out_chunk.iter_mut().zip(in_chunk.iter()) {
                    *out = Some(f(item));
                }
            }));
        }
        for handle in handles {
            let _ = handle.join();
        }
    });

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_order_across_chunks() {
        let items: Vec<i32> = (0..37).collect();
        let cancel = CancelFlag::new();
        let results = parallel_map_chunked(&items, &cancel, |x| x * 2);
        let expected: Vec<Option<i32>> = items.iter().map(|x| Some(x * 2)).collect();
        assert_eq!(results, expected);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let items: Vec<i32> = Vec::new();
        let cancel = CancelFlag::new();
        let results = parallel_map_chunked(&items, &cancel, |x| x * 2);
        assert!(results.is_empty());
    }

    #[test]
    fn pre_cancelled_flag_skips_every_chunk() {
        let items: Vec<i32> = (0..10).collect();
        let cancel = CancelFlag::new();
        cancel.cancel();
        let results = parallel_map_chunked(&items, &cancel, |x| x * 2);
        assert!(results.iter().all(|r| r.is_none()));
    }
}
