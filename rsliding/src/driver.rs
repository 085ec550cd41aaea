// Copyright (c) the rsliding Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Splits the outer axis of an output [`Array`] into contiguous row ranges
//! and runs each range's work, optionally across a `rayon` thread pool,
//! writing through disjoint mutable slices so no `unsafe` is needed.

use crate::array::Array;
use crate::error::{Error, Result};

/// How many worker threads the parallel façade functions should use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Threads {
    /// Run on the calling thread; no pool is built.
    Sequential,
    /// One worker per available core, per [`std::thread::available_parallelism`].
    Auto,
    /// Exactly this many workers.
    Count(usize),
}

fn validate_threads(threads: Threads) -> Result<()> {
    if let Threads::Count(0) = threads {
        return Err(Error::InvalidThreadCount(0));
    }
    Ok(())
}

fn worker_count(threads: Threads, outer_len: usize) -> usize {
    let available = match threads {
        Threads::Sequential => 1,
        Threads::Auto => std::thread::available_parallelism().map(usize::from).unwrap_or(1),
        Threads::Count(n) => n,
    };
    available.max(1).min(outer_len.max(1))
}

/// Splits `outer_len` rows into `workers` contiguous, near-equal ranges
/// (earlier ranges absorb the remainder), dropping any empty range.
fn partition_bounds(outer_len: usize, workers: usize) -> Vec<(usize, usize)> {
    let workers = workers.max(1);
    let base = outer_len / workers;
    let remainder = outer_len % workers;
    let mut bounds = Vec::with_capacity(workers);
    let mut start = 0;
    for i in 0..workers {
        let len = base + usize::from(i < remainder);
        if len == 0 {
            continue;
        }
        bounds.push((start, start + len));
        start += len;
    }
    bounds
}

/// Runs `work(row_start, row_end, rows)` once per partition of `out`'s outer
/// axis, where `rows` is that partition's disjoint mutable slice of `out`'s
/// backing storage. Dispatches across a fresh `rayon` thread pool sized to
/// `threads` unless the `parallel` feature is disabled or `threads` is
/// `Sequential`.
pub fn dispatch(
    threads: Threads,
    out: &mut Array,
    work: impl Fn(usize, usize, &mut [f64]) + Sync,
) -> Result<()> {
    validate_threads(threads)?;
    let outer_len = out.outer_len();
    let row_len = out.row_len();
    let workers = worker_count(threads, outer_len);
    let bounds = partition_bounds(outer_len, workers);

    let mut remaining = out.as_mut_slice();
    let mut chunks: Vec<(usize, usize, &mut [f64])> = Vec::with_capacity(bounds.len());
    for (start, end) in bounds {
        let (chunk, rest) = remaining.split_at_mut((end - start) * row_len);
        chunks.push((start, end, chunk));
        remaining = rest;
    }

    run_chunks(threads, workers, chunks, work)
}

/// Like [`dispatch`], but also splits an auxiliary same-length-per-row `bool`
/// buffer (`aux`) in lockstep with `out`, for reducers that produce a second
/// output alongside the primary one (sigma-clipping's kept-mask).
pub fn dispatch_paired(
    threads: Threads,
    out: &mut Array,
    aux: &mut [bool],
    work: impl Fn(usize, usize, &mut [f64], &mut [bool]) + Sync,
) -> Result<()> {
    validate_threads(threads)?;
    let outer_len = out.outer_len();
    let row_len = out.row_len();
    let workers = worker_count(threads, outer_len);
    let bounds = partition_bounds(outer_len, workers);

    let mut remaining = out.as_mut_slice();
    let mut remaining_aux = aux;
    let mut chunks: Vec<(usize, usize, &mut [f64], &mut [bool])> = Vec::with_capacity(bounds.len());
    for (start, end) in bounds {
        let (chunk, rest) = remaining.split_at_mut((end - start) * row_len);
        let (aux_chunk, aux_rest) = remaining_aux.split_at_mut((end - start) * row_len);
        chunks.push((start, end, chunk, aux_chunk));
        remaining = rest;
        remaining_aux = aux_rest;
    }

    run_paired_chunks(threads, workers, chunks, work)
}

#[cfg(feature = "parallel")]
fn run_paired_chunks<'a>(
    threads: Threads,
    workers: usize,
    chunks: Vec<(usize, usize, &'a mut [f64], &'a mut [bool])>,
    work: impl Fn(usize, usize, &mut [f64], &mut [bool]) + Sync,
) -> Result<()> {
    if matches!(threads, Threads::Sequential) || chunks.len() <= 1 {
        for (start, end, chunk, aux_chunk) in chunks {
            work(start, end, chunk, aux_chunk);
        }
        return Ok(());
    }
    #[cfg(feature = "tracing")]
    tracing::debug!(workers, partitions = chunks.len(), "dispatching sliding-window worker pool");
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .expect("failed to build the sliding-window worker pool");
    pool.scope(|scope| {
        for (start, end, chunk, aux_chunk) in chunks {
            let work = &work;
            scope.spawn(move |_| work(start, end, chunk, aux_chunk));
        }
    });
    Ok(())
}

#[cfg(not(feature = "parallel"))]
fn run_paired_chunks<'a>(
    _threads: Threads,
    _workers: usize,
    chunks: Vec<(usize, usize, &'a mut [f64], &'a mut [bool])>,
    work: impl Fn(usize, usize, &mut [f64], &mut [bool]) + Sync,
) -> Result<()> {
    for (start, end, chunk, aux_chunk) in chunks {
        work(start, end, chunk, aux_chunk);
    }
    Ok(())
}

#[cfg(feature = "parallel")]
fn run_chunks<'a>(
    threads: Threads,
    workers: usize,
    chunks: Vec<(usize, usize, &'a mut [f64])>,
    work: impl Fn(usize, usize, &mut [f64]) + Sync,
) -> Result<()> {
    if matches!(threads, Threads::Sequential) || chunks.len() <= 1 {
        for (start, end, chunk) in chunks {
            work(start, end, chunk);
        }
        return Ok(());
    }
    #[cfg(feature = "tracing")]
    tracing::debug!(workers, partitions = chunks.len(), "dispatching sliding-window worker pool");
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .expect("failed to build the sliding-window worker pool");
    pool.scope(|scope| {
        for (start, end, chunk) in chunks {
            let work = &work;
            scope.spawn(move |_| work(start, end, chunk));
        }
    });
    Ok(())
}

#[cfg(not(feature = "parallel"))]
fn run_chunks<'a>(
    _threads: Threads,
    _workers: usize,
    chunks: Vec<(usize, usize, &'a mut [f64])>,
    work: impl Fn(usize, usize, &mut [f64]) + Sync,
) -> Result<()> {
    for (start, end, chunk) in chunks {
        work(start, end, chunk);
    }
    Ok(())
}
