//! Projectile pool.
//!
//! Every projectile ever constructed lives here for the lifetime of the pool.
//! A slot is either on the free list or in flight, never both. Handles carry
//! a generation that is bumped on release, so a stale handle (for example a
//! timeout firing after a hit already reclaimed the slot and the weapon
//! re-acquired it) can never release someone else's projectile.

use glam::DVec2;

/// Opaque reference to one pooled projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProjectileHandle {
    index: u32,
    generation: u32,
}

impl ProjectileHandle {
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

/// A pooled projectile.
#[derive(Debug, Clone)]
pub struct Projectile {
    handle: ProjectileHandle,
    active: bool,
    pub damage: f64,
    pub position: DVec2,
    pub velocity: DVec2,
    /// Lifetime granted at launch, in seconds.
    pub time_to_live: f64,
    /// Pending timeout. Cleared by `release`.
    pub expires_at: Option<f64>,
}

impl Projectile {
    fn inactive(index: u32) -> Self {
        Self {
            handle: ProjectileHandle {
                index,
                generation: 0,
            },
            active: false,
            damage: 0.0,
            position: DVec2::ZERO,
            velocity: DVec2::ZERO,
            time_to_live: 0.0,
            expires_at: None,
        }
    }

    pub fn handle(&self) -> ProjectileHandle {
        self.handle
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Put the projectile in flight and arm its timeout.
    pub fn launch(
        &mut self,
        position: DVec2,
        velocity: DVec2,
        damage: f64,
        time_to_live: f64,
        now: f64,
    ) {
        self.position = position;
        self.velocity = velocity;
        self.damage = damage;
        self.time_to_live = time_to_live;
        self.expires_at = Some(now + time_to_live);
    }

    /// Whether the pending timeout has elapsed at `now`.
    pub fn is_expired(&self, now: f64) -> bool {
        self.expires_at.is_some_and(|t| now >= t)
    }
}

/// Grow-on-demand pool of projectiles with an O(1) free list.
#[derive(Debug, Clone, Default)]
pub struct ProjectilePool {
    slots: Vec<Projectile>,
    /// Stack of free slot indices.
    free: Vec<u32>,
}

impl ProjectilePool {
    /// Create a pool with `initial_size` projectiles already constructed.
    pub fn new(initial_size: usize) -> Self {
        let mut pool = Self {
            slots: Vec::with_capacity(initial_size),
            free: Vec::with_capacity(initial_size),
        };
        for _ in 0..initial_size {
            let index = pool.construct();
            pool.free.push(index);
        }
        // Pop order hands out index 0 first.
        pool.free.reverse();
        pool
    }

    fn construct(&mut self) -> u32 {
        let index = self.slots.len() as u32;
        self.slots.push(Projectile::inactive(index));
        index
    }

    /// Take a projectile off the free list, constructing one if none is free.
    /// Never fails.
    pub fn acquire(&mut self) -> ProjectileHandle {
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                let index = self.construct();
                log::debug!("projectile pool grew to {}", self.slots.len());
                index
            }
        };
        let slot = &mut self.slots[index as usize];
        slot.active = true;
        slot.handle
    }

    /// Return a projectile to the free list and cancel its timeout.
    ///
    /// Returns `false` without touching anything if the handle is stale or
    /// the projectile is already free.
    pub fn release(&mut self, handle: ProjectileHandle) -> bool {
        let Some(slot) = self.slots.get_mut(handle.index as usize) else {
            return false;
        };
        if !slot.active || slot.handle.generation != handle.generation {
            return false;
        }
        slot.active = false;
        slot.expires_at = None;
        slot.velocity = DVec2::ZERO;
        slot.handle.generation = slot.handle.generation.wrapping_add(1);
        self.free.push(handle.index);
        true
    }

    /// The projectile behind a live handle.
    pub fn get(&self, handle: ProjectileHandle) -> Option<&Projectile> {
        self.slots
            .get(handle.index as usize)
            .filter(|p| p.active && p.handle.generation == handle.generation)
    }

    pub fn get_mut(&mut self, handle: ProjectileHandle) -> Option<&mut Projectile> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|p| p.active && p.handle.generation == handle.generation)
    }

    pub fn is_active(&self, handle: ProjectileHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Total projectiles ever constructed (free + active).
    pub fn size(&self) -> usize {
        self.slots.len()
    }

    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    pub fn active_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Slot indices currently on the free list.
    pub fn free_indices(&self) -> &[u32] {
        &self.free
    }

    /// Handles of every in-flight projectile, in slot order.
    pub fn active_handles(&self) -> impl Iterator<Item = ProjectileHandle> + '_ {
        self.slots.iter().filter(|p| p.active).map(|p| p.handle)
    }

    /// Every in-flight projectile, in slot order.
    pub fn active(&self) -> impl Iterator<Item = &Projectile> + '_ {
        self.slots.iter().filter(|p| p.active)
    }
}
