use std::sync::atomic::{AtomicI64, Ordering};

/// # Summary
/// 时间供给器接口，用于劫持和隔离物理系统时钟。
/// 兑换参数的 deadline 必须通过此接口计算，测试才能对其精确断言。
pub trait Clock: Send + Sync {
    /// 获取当前 Unix 时间戳 (秒)
    fn now_epoch_seconds(&self) -> i64;
}

/// # Summary
/// 针对实际运行的真实时钟，直接返回操作系统当前时间。
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_seconds(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// # Summary
/// 测试专用固定时钟，允许用例主动拨快或回退时间。
///
/// # Invariants
/// - 并发安全：内部利用原子变量提供多线程安全的读写。
pub struct FixedClock {
    current: AtomicI64,
}

impl FixedClock {
    /// 使用指定的初始时间戳创建固定时钟
    pub fn new(epoch_seconds: i64) -> Self {
        Self {
            current: AtomicI64::new(epoch_seconds),
        }
    }

    /// 强制修改时钟的当前时间
    pub fn set(&self, epoch_seconds: i64) {
        self.current.store(epoch_seconds, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now_epoch_seconds(&self) -> i64 {
        self.current.load(Ordering::SeqCst)
    }
}
