/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/// Builds a [rayon](rayon) thread pool.
///
/// `threads![]` builds a pool with the default number of threads, whereas
/// `threads![n]` builds a pool with `n` threads.
///
/// # Panics
///
/// If the thread pool cannot be built.
#[macro_export]
macro_rules! threads {
    () => {
        $crate::utils::rayon::ThreadPoolBuilder::new()
            .build()
            .expect("Should be able to build default threadpool")
    };
    ($num_threads:expr) => {
        $crate::utils::rayon::ThreadPoolBuilder::new()
            .num_threads($num_threads)
            .build()
            .unwrap_or_else(|_| {
                panic!(
                    "Should be able to build custom threadpool with {} threads",
                    $num_threads
                )
            })
    };
}
