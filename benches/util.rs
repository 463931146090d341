#![allow(dead_code)]

#[cfg(target_arch = "x86")]
pub fn core_cycles() -> u64 {
    use core::arch::x86::{_mm_lfence, _rdtsc};
    unsafe {
        _mm_lfence();
        _rdtsc()
    }
}

#[cfg(target_arch = "x86_64")]
pub fn core_cycles() -> u64 {
    use core::arch::x86_64::{_mm_lfence, _rdtsc};
    unsafe {
        _mm_lfence();
        _rdtsc()
    }
}

#[cfg(target_arch = "aarch64")]
pub fn core_cycles() -> u64 {
    use core::arch::asm;
    let mut x: u64;
    unsafe {
        asm!("dsb sy", "mrs {}, pmccntr_el0", out(reg) x);
    }
    x
}

#[cfg(target_arch = "riscv64")]
pub fn core_cycles() -> u64 {
    use core::arch::asm;
    let mut x: u64;
    unsafe {
        asm!("rdcycle {}", out(reg) x);
    }
    x
}

/// 32 bytes derived from the current cycle counter, so that inputs are
/// not known at compile time.
pub fn cycles_seed() -> [u8; 32] {
    let z = core_cycles();
    let mut b = [0u8; 32];
    for i in 0..4 {
        b[8 * i..8 * i + 8].copy_from_slice(&z.wrapping_mul(2 * i as u64 + 1).to_le_bytes());
    }
    b
}

/// Runs `f` (which performs `n` operations) 100 times, and returns the
/// median cost of one operation, in cycles.
pub fn median_cycles<F: FnMut()>(n: usize, mut f: F) -> f64 {
    let mut tt = [0u64; 100];
    for i in 0..tt.len() {
        let begin = core_cycles();
        f();
        let end = core_cycles();
        tt[i] = end.wrapping_sub(begin);
    }
    tt.sort();
    (tt[tt.len() >> 1] as f64) / (n as f64)
}
