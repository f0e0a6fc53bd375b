// -------------------------------------------------------------------
// Versioned
// -------------------------------------------------------------------

/// A value paired with a counter bumped on every mutable access.
#[derive(Debug, Clone, Default)]
pub struct Versioned<T> {
    version: u64,
    data: T,
}

impl<T> Versioned<T> {
    pub fn new(data: T) -> Self {
        Self { version: 0, data }
    }
    pub fn get(&self) -> &T {
        &self.data
    }
    pub fn get_mut(&mut self) -> &mut T {
        self.version = self.version.wrapping_add(1);
        &mut self.data
    }
    pub fn set(&mut self, data: T) {
        self.data = data;
        self.version = self.version.wrapping_add(1);
    }
    pub fn version(&self) -> u64 {
        self.version
    }
}

// -------------------------------------------------------------------
// Memoized
// -------------------------------------------------------------------

pub struct Memoized<S, K, V> {
    version: u64,
    cached: Option<(K, V)>,
    get_key: Box<dyn Fn(&S) -> K>,
    calc: Box<dyn Fn(&S) -> V>,
}

impl<S, K, V> Memoized<S, K, V>
where
    K: PartialEq,
{
    pub fn new(
        get_key: impl Fn(&S) -> K + 'static,
        calc: impl Fn(&S) -> V + 'static,
    ) -> Self {
        Self {
            version: 0,
            cached: None,
            get_key: Box::new(get_key),
            calc: Box::new(calc),
        }
    }

    /// Recompute only if the key changed; return a reference to the cached value.
    pub fn get<'a>(&'a mut self, source: &S) -> &'a V {
        let key = (self.get_key)(source);
        if self
            .cached
            .as_ref()
            .is_some_and(|(cached, _)| *cached != key)
        {
            self.cached = None;
        }
        if self.cached.is_none() {
            self.version = self.version.wrapping_add(1);
        }
        let calc = &self.calc;
        &self.cached.get_or_insert_with(|| (key, calc(source))).1
    }

    /// Number of recomputations so far.
    pub fn version(&self) -> u64 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_mut_bumps_version() {
        let mut value = Versioned::new(vec![1]);
        assert_eq!(value.version(), 0);
        let _ = value.get();
        assert_eq!(value.version(), 0);
        value.get_mut().push(2);
        value.set(vec![]);
        assert_eq!(value.version(), 2);
    }

    #[test]
    fn test_memoized_recomputes_on_key_change() {
        let mut source = Versioned::new(3_u32);
        let mut doubled = Memoized::new(
            |s: &Versioned<u32>| s.version(),
            |s: &Versioned<u32>| *s.get() * 2,
        );

        assert_eq!(*doubled.get(&source), 6);
        assert_eq!(*doubled.get(&source), 6);
        assert_eq!(doubled.version(), 1);

        source.set(5);
        assert_eq!(*doubled.get(&source), 10);
        assert_eq!(doubled.version(), 2);
    }
}
