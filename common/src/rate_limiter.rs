//! レート制限モジュール
//!
//! スライディングウィンドウで外部AI呼び出しの回数を制限する。
//! 上限に達した場合は拒否せず、ウィンドウから古いリクエストが外れるまで待機する。

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// 1ウィンドウあたりのデフォルト上限
pub const DEFAULT_MAX_REQUESTS: usize = 480;

const DEFAULT_WINDOW: Duration = Duration::from_secs(60);
const DEFAULT_MARGIN: Duration = Duration::from_secs(1);

/// スライディングウィンドウ型レートリミッタ
///
/// 複数スレッドから `Arc<RateLimiter>` で共有できる。
#[derive(Debug)]
pub struct RateLimiter {
    max_requests: usize,
    window: Duration,
    margin: Duration,
    request_times: Mutex<VecDeque<Instant>>,
}

impl RateLimiter {
    /// 60秒ウィンドウ・1秒マージンで作成
    pub fn new(max_requests_per_minute: usize) -> Self {
        Self::with_window(max_requests_per_minute, DEFAULT_WINDOW, DEFAULT_MARGIN)
    }

    /// ウィンドウ幅とマージンを指定して作成
    pub fn with_window(max_requests: usize, window: Duration, margin: Duration) -> Self {
        Self {
            max_requests: max_requests.max(1),
            window,
            margin,
            request_times: Mutex::new(VecDeque::new()),
        }
    }

    pub fn max_requests(&self) -> usize {
        self.max_requests
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// 必要に応じて待機し、リクエストを記録する
    ///
    /// 待機中もロックを保持するため、後続の呼び出しは到着順に処理される。
    pub fn wait_if_needed(&self) {
        let mut times = self
            .request_times
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let now = Instant::now();
        self.evict(&mut times, now);

        if times.len() >= self.max_requests {
            if let Some(&oldest) = times.front() {
                let elapsed = now.saturating_duration_since(oldest);
                let wait = (self.window + self.margin).saturating_sub(elapsed);
                if !wait.is_zero() {
                    tracing::debug!(
                        wait_ms = wait.as_millis() as u64,
                        in_window = times.len(),
                        "レート制限: 待機します"
                    );
                    std::thread::sleep(wait);
                    self.evict(&mut times, Instant::now());
                }
            }
        }

        times.push_back(Instant::now());
    }

    /// 現在ウィンドウ内にあるリクエスト数
    pub fn in_flight(&self) -> usize {
        let mut times = self
            .request_times
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        self.evict(&mut times, Instant::now());
        times.len()
    }

    /// ウィンドウより古いリクエストを削除
    fn evict(&self, times: &mut VecDeque<Instant>, now: Instant) {
        while let Some(&front) = times.front() {
            if now.saturating_duration_since(front) > self.window {
                times.pop_front();
            } else {
                break;
            }
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_REQUESTS)
    }
}
