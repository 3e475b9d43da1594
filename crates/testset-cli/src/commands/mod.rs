use testset_core::{TestSet, TestSetError};

pub mod convert;
pub mod dispatch;
pub mod lint;
pub mod show;

/// Area and question counts of a test set, scanning every area.
pub fn counts(testset: &TestSet) -> Result<(usize, usize), TestSetError> {
    let areas = testset.areas().values()?;
    let mut questions = 0;
    for area in &areas {
        questions += area.questions().len()?;
    }
    Ok((areas.len(), questions))
}
