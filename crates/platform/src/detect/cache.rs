//! Process-wide snapshot storage and the pre-init override pin.
//!
//! The pin and the cached snapshot share one lifecycle: a pin can be placed
//! or removed until the cache is sealed by the first [`probe()`](crate::probe),
//! and the sealing read of the pin happens under the same lock (or the same
//! state word) as the writes, so a pin can never land after the cache is
//! filled.

use crate::{error::OverrideError, snapshot::CpuFeatureSnapshot};

/// Builds the cached snapshot from the pin, if any.
pub type Init = fn(Option<CpuFeatureSnapshot>) -> CpuFeatureSnapshot;

#[cfg(feature = "std")]
pub use locked::{get_or_init, has_override, try_set_override};

#[cfg(all(not(feature = "std"), target_has_atomic = "8"))]
pub use spin::{get_or_init, has_override, try_set_override};

#[cfg(all(not(feature = "std"), not(target_has_atomic = "8")))]
pub use uncached::{get_or_init, has_override, try_set_override};

/// Pin `snapshot` as the result of every future [`probe()`](crate::probe).
///
/// `None` removes a previous pin.
///
/// # Panics
///
/// Panics if [`probe()`](crate::probe) already ran, or if the build has no
/// storage for a pin. Use [`try_set_override`] to handle either case.
#[cold]
pub fn set_override(snapshot: Option<CpuFeatureSnapshot>) {
  if let Err(err) = try_set_override(snapshot) {
    panic!("platform::set_override failed: {err}");
  }
}

/// Remove a pin placed by [`set_override`].
///
/// # Panics
///
/// Same conditions as [`set_override`].
#[cold]
pub fn clear_override() {
  set_override(None);
}

// ─────────────────────────────────────────────────────────────────────────────
// std: OnceLock + Mutex
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(feature = "std")]
mod locked {
  use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

  use super::{Init, OverrideError};
  use crate::snapshot::CpuFeatureSnapshot;

  struct Pin {
    snapshot: Option<CpuFeatureSnapshot>,
    sealed: bool,
  }

  static PIN: Mutex<Pin> = Mutex::new(Pin {
    snapshot: None,
    sealed: false,
  });
  static SNAPSHOT: OnceLock<CpuFeatureSnapshot> = OnceLock::new();

  // `Pin` is plain data; a panic while it was held cannot leave it torn.
  fn pin() -> MutexGuard<'static, Pin> {
    PIN.lock().unwrap_or_else(PoisonError::into_inner)
  }

  pub fn get_or_init(init: Init) -> &'static CpuFeatureSnapshot {
    SNAPSHOT.get_or_init(|| {
      let mut pin = pin();
      pin.sealed = true;
      init(pin.snapshot)
    })
  }

  /// Pin `snapshot`, unless the cache is already sealed.
  #[cold]
  pub fn try_set_override(snapshot: Option<CpuFeatureSnapshot>) -> Result<(), OverrideError> {
    let mut pin = pin();
    if pin.sealed {
      return Err(OverrideError::AlreadyInitialized);
    }
    pin.snapshot = snapshot;
    Ok(())
  }

  #[must_use]
  pub fn has_override() -> bool {
    pin().snapshot.is_some()
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// no_std with atomics: one state word guards both slots
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(all(not(feature = "std"), target_has_atomic = "8"))]
#[allow(unsafe_code)]
mod spin {
  use core::{
    cell::UnsafeCell,
    hint,
    sync::atomic::{AtomicU8, Ordering},
  };

  use super::{Init, OverrideError};
  use crate::{caps::Arch, snapshot::CpuFeatureSnapshot};

  /// Nobody holds either slot.
  const OPEN: u8 = 0;
  /// A setter is writing the pin.
  const PINNING: u8 = 1;
  /// The first probe is reading the pin and filling the snapshot.
  const SEALING: u8 = 2;
  /// The snapshot is filled and immutable.
  const SEALED: u8 = 3;

  struct Slot<T>(UnsafeCell<T>);

  // SAFETY: every access goes through `STATE`: writes happen only while this
  // thread holds PINNING or SEALING, reads of SNAPSHOT only after SEALED.
  unsafe impl<T: Send> Sync for Slot<T> {}

  static STATE: AtomicU8 = AtomicU8::new(OPEN);
  static PIN: Slot<Option<CpuFeatureSnapshot>> = Slot(UnsafeCell::new(None));
  static SNAPSHOT: Slot<CpuFeatureSnapshot> = Slot(UnsafeCell::new(CpuFeatureSnapshot::empty(Arch::current())));

  /// Move `STATE` from OPEN to `to`, waiting out a concurrent pinner.
  ///
  /// Returns the state that blocked the transition if it was past PINNING.
  fn acquire(to: u8) -> Result<(), u8> {
    loop {
      match STATE.compare_exchange_weak(OPEN, to, Ordering::Acquire, Ordering::Acquire) {
        Ok(_) => return Ok(()),
        Err(OPEN | PINNING) => hint::spin_loop(),
        Err(state) => return Err(state),
      }
    }
  }

  fn sealed() -> &'static CpuFeatureSnapshot {
    // SAFETY: callers observed SEALED with Acquire; the slot is never
    // written again, so a shared 'static borrow stays valid.
    unsafe { &*SNAPSHOT.0.get() }
  }

  pub fn get_or_init(init: Init) -> &'static CpuFeatureSnapshot {
    if STATE.load(Ordering::Acquire) == SEALED {
      return sealed();
    }
    match acquire(SEALING) {
      Ok(()) => {
        // SAFETY: SEALING is held exclusively by this thread.
        unsafe {
          let pin = *PIN.0.get();
          *SNAPSHOT.0.get() = init(pin);
        }
        STATE.store(SEALED, Ordering::Release);
      }
      Err(_) => {
        while STATE.load(Ordering::Acquire) != SEALED {
          hint::spin_loop();
        }
      }
    }
    sealed()
  }

  #[cold]
  pub fn try_set_override(snapshot: Option<CpuFeatureSnapshot>) -> Result<(), OverrideError> {
    acquire(PINNING).map_err(|_| OverrideError::AlreadyInitialized)?;
    // SAFETY: PINNING is held exclusively by this thread.
    unsafe { *PIN.0.get() = snapshot };
    STATE.store(OPEN, Ordering::Release);
    Ok(())
  }

  #[must_use]
  pub fn has_override() -> bool {
    match acquire(PINNING) {
      Ok(()) => {
        // SAFETY: PINNING is held exclusively by this thread.
        let pinned = unsafe { (*PIN.0.get()).is_some() };
        STATE.store(OPEN, Ordering::Release);
        pinned
      }
      // SAFETY: past SEALING the pin is never written again.
      Err(_) => unsafe { (*PIN.0.get()).is_some() },
    }
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// no_std without atomics: nothing to cache into
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(all(not(feature = "std"), not(target_has_atomic = "8")))]
mod uncached {
  use super::{Init, OverrideError};
  use crate::{caps::Arch, snapshot::CpuFeatureSnapshot};

  static BARE: CpuFeatureSnapshot = CpuFeatureSnapshot::empty(Arch::current());

  pub fn get_or_init(_init: Init) -> &'static CpuFeatureSnapshot {
    &BARE
  }

  pub fn try_set_override(_snapshot: Option<CpuFeatureSnapshot>) -> Result<(), OverrideError> {
    Err(OverrideError::Unsupported)
  }

  pub fn has_override() -> bool {
    false
  }
}
