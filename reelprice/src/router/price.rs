use reelprice_core::{
    Capability, CheapestPrice, MovieDetail, MovieRecord, NormalizedTitle, ReelError, TitleIndex,
};

use crate::Reel;
use crate::core::{tag_err, with_request_deadline};
use crate::router::retry::Retrier;
use crate::router::util::{collapse_errors, join_with_deadline};

impl Reel {
    /// Resolve the lowest price offered for `title` across every provider that lists it.
    ///
    /// The title is normalized before lookup, so case and surrounding
    /// whitespace do not matter. Offers whose detail could not be fetched or
    /// carries no usable price are skipped while another offer has a price.
    /// Prices compare numerically; on a tie the offer from the
    /// higher-precedence provider wins.
    ///
    /// # Errors
    /// - `NotFound` when the title is not in `index`, or every detail was
    ///   fetched and none had a usable price.
    /// - A fatal detail error (bad configuration, broken connector) as-is.
    /// - When no offer had a price and some fetches gave up, those failures
    ///   collapsed: the single error, or `AllProvidersFailed`.
    /// - `RequestTimeout` when the request deadline elapses.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "reelprice::price::cheapest", skip(self, index))
    )]
    pub async fn cheapest(
        &self,
        title: &str,
        index: &TitleIndex,
    ) -> Result<CheapestPrice, ReelError> {
        let records = index.get(title).ok_or_else(|| not_found(title))?;
        self.cheapest_of(title, records).await
    }

    /// Like [`Reel::cheapest`], addressing the title by its 1-based position
    /// in the sorted index.
    ///
    /// # Errors
    /// `InvalidArg` for a non-numeric, zero, or out-of-range selection (nothing
    /// is fetched in that case); otherwise as [`Reel::cheapest`].
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "reelprice::price::cheapest_at", skip(self, index))
    )]
    pub async fn cheapest_at(
        &self,
        index: &TitleIndex,
        selection: &str,
    ) -> Result<CheapestPrice, ReelError> {
        let (title, records) = index.select(selection)?;
        self.cheapest_of(title.as_str(), records).await
    }

    /// Every detail record for `title` that could be fetched, in bucket order.
    ///
    /// # Errors
    /// - `NotFound` when the title is not in `index`.
    /// - A fatal detail error as-is; the collapsed fetch failures when no
    ///   detail could be fetched at all.
    /// - `RequestTimeout` when the request deadline elapses.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "reelprice::price::offers", skip(self, index))
    )]
    pub async fn offers(
        &self,
        title: &str,
        index: &TitleIndex,
    ) -> Result<Vec<MovieDetail>, ReelError> {
        let records = index.get(title).ok_or_else(|| not_found(title))?;
        let results = self.fetch_details(Capability::Detail, records).await?;
        let (details, failures): (Vec<_>, Vec<_>) = results.into_iter().partition(Result::is_ok);
        if details.is_empty() && !failures.is_empty() {
            let errors = failures.into_iter().filter_map(Result::err).collect();
            return Err(collapse_errors(errors, Some(not_found_what(title))));
        }
        Ok(details.into_iter().filter_map(Result::ok).collect())
    }

    /// Build a fresh index and resolve `title` against it, both under one
    /// request deadline.
    ///
    /// # Errors
    /// As [`Reel::build_index`] and [`Reel::cheapest`]; `RequestTimeout` when
    /// the two phases together outlast the request deadline.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "reelprice::price::cheapest_price", skip(self))
    )]
    pub async fn cheapest_price(&self, title: &str) -> Result<CheapestPrice, ReelError> {
        with_request_deadline(Capability::Cheapest, self.cfg.request_timeout, async {
            let index = self.build_index().await?;
            self.cheapest(title, &index).await
        })
        .await?
    }

    async fn cheapest_of(
        &self,
        title: &str,
        records: &[MovieRecord],
    ) -> Result<CheapestPrice, ReelError> {
        let results = self.fetch_details(Capability::Cheapest, records).await?;

        let mut best: Option<CheapestPrice> = None;
        let mut failures: Vec<ReelError> = Vec::new();
        for res in results {
            let detail = match res {
                Ok(detail) => detail,
                Err(e) => {
                    failures.push(e);
                    continue;
                }
            };
            let price = match detail.price() {
                Ok(p) => p,
                #[cfg(feature = "tracing")]
                Err(e) => {
                    tracing::warn!(
                        provider = %detail.movie.provider,
                        id = %detail.movie.id,
                        error = %e,
                        "skipping offer without a usable price"
                    );
                    continue;
                }
                #[cfg(not(feature = "tracing"))]
                Err(_) => continue,
            };
            if best.as_ref().is_none_or(|b| price < b.price) {
                best = Some(CheapestPrice {
                    price,
                    provider: detail.movie.provider,
                    id: detail.movie.id,
                });
            }
        }

        match best {
            Some(best) => Ok(best),
            None if failures.is_empty() => Err(not_found(title)),
            None => Err(collapse_errors(failures, Some(not_found_what(title)))),
        }
    }

    // One result per record, in bucket order. Skippable failures are logged
    // and kept; the first fatal one aborts the whole fetch.
    async fn fetch_details(
        &self,
        capability: Capability,
        records: &[MovieRecord],
    ) -> Result<Vec<Result<MovieDetail, ReelError>>, ReelError> {
        let retrier = Retrier::new(self.cfg.retry);
        let tasks = records
            .iter()
            .map(|record| self.fetch_detail(&retrier, record));
        let results = join_with_deadline(capability, tasks, self.cfg.request_timeout).await?;

        #[cfg(feature = "tracing")]
        for (record, res) in records.iter().zip(&results) {
            if let Err(e) = res {
                tracing::warn!(
                    provider = %record.provider,
                    id = %record.id,
                    error = %e,
                    "skipping offer whose detail could not be fetched"
                );
            }
        }

        Ok(results)
    }

    // Outer error: fatal, stop resolving. Inner error: skip this offer.
    async fn fetch_detail(
        &self,
        retrier: &Retrier,
        record: &MovieRecord,
    ) -> Result<Result<MovieDetail, ReelError>, ReelError> {
        let connector = self.connector_for(record.provider).ok_or_else(|| {
            ReelError::InvalidArg(format!("no connector registered for {}", record.provider))
        })?;
        let dp = connector.as_detail_provider().ok_or_else(|| {
            ReelError::connector(connector.name(), "detail fetch not supported")
        })?;
        let timeout = self.cfg.provider_timeout;
        let res = retrier
            .retry(Capability::Detail, || {
                Self::provider_call_with_timeout(
                    record.provider,
                    Capability::Detail,
                    timeout,
                    dp.detail(&record.id),
                )
            })
            .await
            .map_err(|e| tag_err(connector.name(), e));
        match res {
            Err(e) if !is_skippable(&e) => Err(e),
            other => Ok(other),
        }
    }
}

// Failures retrying gave up on, and records the provider no longer has.
fn is_skippable(e: &ReelError) -> bool {
    e.is_transient() || e.is_not_found() || matches!(e, ReelError::RetriesExhausted { .. })
}

fn not_found_what(title: &str) -> String {
    format!("price for {}", NormalizedTitle::new(title))
}

fn not_found(title: &str) -> ReelError {
    ReelError::not_found(not_found_what(title))
}
