//! The study exercises, run in order against one store

use crate::slices::products::{self, FilterChange, PriceRange};
use crate::slices::{counter, lessons, photos, student};
use crate::store::Lab;
use anyhow::Result;
use statekit::{Dispatched, SliceMap};
use statekit_fetch::{FetchState, FetchStatus};

/// One-line view of the whole state
pub fn summary(state: &SliceMap) -> String {
    let count = state.get::<i64>(counter::NAME).copied().unwrap_or_default();
    let days = state
        .get::<student::Student>(student::NAME)
        .map(|s| s.days_left)
        .unwrap_or_default();
    let (done, total) = state
        .get::<Vec<lessons::Lesson>>(lessons::NAME)
        .map(|l| lessons::progress(l))
        .unwrap_or_default();
    let photos = match state
        .get::<FetchState<Vec<photos::Photo>>>(photos::NAME)
        .map(FetchState::status)
    {
        Some(FetchStatus::Loading) => "loading".to_string(),
        Some(FetchStatus::Failed(error)) => format!("error: {}", error),
        Some(FetchStatus::Ready(data)) => format!("{} photo(s)", data.len()),
        Some(FetchStatus::Idle) | None => "idle".to_string(),
    };

    format!(
        "counter={} days_left={} lessons={}/{} photos=[{}]",
        count, days, done, total, photos
    )
}

/// Counter exercise: four increments and one decrement (which raises an alert)
pub fn run_counter(lab: &Lab) {
    for _ in 0..4 {
        lab.store.dispatch(lab.counter.action("increment"));
    }
    let result = lab.store.dispatch(lab.counter.action("decrement"));
    println!("decrement returned {:?}", result);
}

/// Student exercise
pub fn run_student(lab: &Lab, new_email: &str) {
    lab.store.dispatch(lab.student.action("incrementDays"));
    lab.store.dispatch(lab.student.action("decrementDays"));
    lab.store.dispatch(lab.student.action("decrementDays"));
    lab.store.dispatch(student::change_email(new_email));
}

/// Lessons exercise: finish the course, start over, then complete the first lesson
pub fn run_lessons(lab: &Lab) {
    lab.store.dispatch(lessons::complete_lesson(2));
    lab.store.dispatch(lab.lessons.action("completeCourse"));
    lab.store.dispatch(lab.lessons.action("resetCourse"));
    lab.store.dispatch(lessons::complete_lesson(1));
}

/// Products exercise: narrow the catalogue by color and price
pub fn run_products(lab: &Lab) -> Result<()> {
    println!(
        "colors: {}",
        products::select_unique_colors(&lab.store.get_state()).join(", ")
    );
    lab.store
        .dispatch(products::change_filters(&FilterChange::Colors(vec!["blue".to_string()]))?);
    lab.store.dispatch(products::change_filters(&FilterChange::Prices(PriceRange {
        min: 100.0,
        max: 1000.0,
    }))?);

    for product in products::select_filtered_products(&lab.store.get_state()) {
        println!("  {} | {} | {:.2}", product.name, product.color, product.price);
    }
    Ok(())
}

/// Photos exercise: fetch twice, the second call hitting the cache
pub async fn run_photos(lab: &Lab) {
    for attempt in 1..=2 {
        match lab.store.dispatch(lab.photos.async_action(())) {
            Dispatched::Consumed => println!("photos #{}: served from cache", attempt),
            pending => {
                pending.settle().await;
                println!("photos #{}: fetched", attempt);
            }
        }
    }

    match photos::heavy_photos_in_pounds(&lab.photos, &lab.store.get_state()) {
        Some(heavy) => {
            for photo in heavy {
                println!("  {} | {} pounds", photo.title, photo.peso);
            }
        }
        None => println!("  no photos available"),
    }
}

pub async fn run_all(lab: &Lab) -> Result<()> {
    println!("== counter ==");
    run_counter(lab);
    println!("== student ==");
    run_student(lab, "ada@analytical.engine");
    println!("== lessons ==");
    run_lessons(lab);
    println!("== products ==");
    run_products(lab)?;
    println!("== photos ==");
    run_photos(lab).await;
    Ok(())
}
